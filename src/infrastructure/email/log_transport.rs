// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::email_transport::{Email, EmailError, EmailTransport};
use async_trait::async_trait;
use tracing::info;

/// 只记录日志的邮件传输，用于本地开发
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl EmailTransport for LogTransport {
    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        info!(
            from = %email.from.address,
            to = %email.to.address,
            subject = %email.subject,
            body_len = email.body.len(),
            "Email delivered to log transport"
        );
        Ok(())
    }
}
