// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 邮件传输模块
///
/// 提供SendGrid传输与仅记录日志的开发用传输
pub mod log_transport;
pub mod sendgrid;

use crate::config::settings::EmailSettings;
use crate::domain::services::email_transport::{EmailError, EmailTransport};
use std::sync::Arc;

/// 根据配置构建邮件传输
pub fn build_transport(settings: &EmailSettings) -> Result<Arc<dyn EmailTransport>, EmailError> {
    match settings.transport.as_str() {
        "sendgrid" => {
            let api_key = settings.sendgrid_api_key.clone().ok_or_else(|| {
                EmailError::Request("email.sendgrid_api_key is required for sendgrid".to_string())
            })?;
            Ok(Arc::new(sendgrid::SendGridTransport::new(
                settings.sendgrid_base_url.clone(),
                api_key,
            )?))
        }
        "log" => Ok(Arc::new(log_transport::LogTransport)),
        other => Err(EmailError::Request(format!(
            "unknown email transport: {}",
            other
        ))),
    }
}
