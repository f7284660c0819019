// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、任务状态机、仓库接口与外部协作者接口
pub mod domain;

/// 基础设施模块
///
/// 提供外部服务集成，如数据库、订阅源、邮件传输与指标
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应
pub mod presentation;

/// 工具模块
///
/// 提供时钟、错误类型与日志初始化
pub mod utils;

/// 工作器模块
///
/// 实现四个后台循环及其生命周期管理
pub mod workers;
