// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 项目仓库（project_repository）
/// - 流水线仓库（pipeline_repository）
/// - 任务仓库（task_repository）
/// - 文章仓库（post_repository）
/// - 订阅仓库（subscription_repository）
/// - 邮件模板仓库（email_template_repository）
///
/// 各循环之间唯一的共享可变资源就是这些仓库背后的存储。
pub mod email_template_repository;
pub mod pipeline_repository;
pub mod post_repository;
pub mod project_repository;
pub mod subscription_repository;
pub mod task_repository;
