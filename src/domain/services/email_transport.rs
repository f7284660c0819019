// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 邮件发送错误
#[derive(Error, Debug)]
pub enum EmailError {
    /// 请求失败
    #[error("Email request failed: {0}")]
    Request(String),
    /// 邮件服务拒绝
    #[error("Email rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    /// 发送超时
    #[error("Email send timed out")]
    Timeout,
}

/// 邮件地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: String,
    pub address: String,
}

impl Mailbox {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// 待发送的邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    /// HTML正文
    pub body: String,
    /// 纯文本正文，为空时只发送HTML
    pub text: String,
}

/// 邮件传输特质
///
/// 超时由调用方控制，实现只需完成一次发送。
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// 发送一封邮件
    async fn send(&self, email: &Email) -> Result<(), EmailError>;
}
