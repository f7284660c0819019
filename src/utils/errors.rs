// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::DomainError;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::services::email_transport::EmailError;
use crate::domain::services::feed_reader::FeedError;
use crate::domain::services::template_renderer::TemplateError;
use crate::domain::services::token_encoder::TokenError;
use thiserror::Error;

/// Worker错误类型
///
/// 单个项目或任务的错误只记录日志，不会中断同一轮次中的其他项目或任务。
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("仓库错误: {0}")]
    Repository(#[from] RepositoryError),

    #[error("领域错误: {0}")]
    Domain(#[from] DomainError),

    #[error("订阅源错误: {0}")]
    Feed(#[from] FeedError),

    #[error("邮件错误: {0}")]
    Email(#[from] EmailError),

    #[error("模板错误: {0}")]
    Template(#[from] TemplateError),

    #[error("令牌错误: {0}")]
    Token(#[from] TokenError),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("已取消")]
    Cancelled,
}
