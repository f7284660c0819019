// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::email_template::EmailTemplate;
use crate::domain::repositories::email_template_repository::EmailTemplateRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::email_template as template_entity;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

/// 邮件模板仓库实现
#[derive(Clone)]
pub struct EmailTemplateRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl EmailTemplateRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<template_entity::Model> for EmailTemplate {
    fn from(model: template_entity::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            name: model.name,
            is_active: model.is_active,
            subject: model.subject,
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl EmailTemplateRepository for EmailTemplateRepositoryImpl {
    async fn find_active(&self, project_id: Uuid) -> Result<Option<EmailTemplate>, RepositoryError> {
        // Several active templates may exist; the most recently edited one wins.
        let model = template_entity::Entity::find()
            .filter(template_entity::Column::ProjectId.eq(project_id))
            .filter(template_entity::Column::IsActive.eq(true))
            .order_by_desc(template_entity::Column::UpdatedAt)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }
}
