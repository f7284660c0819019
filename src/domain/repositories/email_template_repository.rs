// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::email_template::EmailTemplate;
use async_trait::async_trait;
use uuid::Uuid;

/// 邮件模板仓库特质
#[async_trait]
pub trait EmailTemplateRepository: Send + Sync {
    /// 获取项目当前启用的模板，存在多个时取最近更新的一个
    async fn find_active(&self, project_id: Uuid) -> Result<Option<EmailTemplate>, RepositoryError>;
}
