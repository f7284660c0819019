// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 项目（project）：订阅源及其启用状态
/// - 流水线（pipeline）：一次抓取并发布的周期
/// - 任务（task）：流水线中的抓取或发布工作单元及其状态机
/// - 文章（post）：抓取任务生成的内容
/// - 订阅（subscription）与邮件模板（email_template）：发布任务的输入
pub mod email_template;
pub mod pipeline;
pub mod post;
pub mod project;
pub mod subscription;
pub mod task;
