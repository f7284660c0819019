// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 定义工作器依赖的外部协作者接口：订阅源读取、邮件传输、
/// 模板渲染与退订令牌编码。具体实现位于基础设施层。
pub mod email_transport;
pub mod feed_reader;
pub mod template_renderer;
pub mod token_encoder;
