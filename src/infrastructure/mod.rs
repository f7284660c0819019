// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 数据库（database）：提供数据库连接和实体映射
/// - 邮件（email）：SendGrid与日志邮件传输
/// - 订阅源（feed）：RSS/Atom订阅源读取
/// - 指标（metrics）：Prometheus导出与指标记录
/// - 仓库实现（repositories）：提供领域仓库接口的具体实现
/// - 模板（template）：邮件模板渲染
/// - 令牌（token）：退订令牌签名
pub mod database;
pub mod email;
pub mod feed;
pub mod metrics;
pub mod repositories;
pub mod template;
pub mod token;
