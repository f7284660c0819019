// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::Project;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::{
    pipeline as pipeline_entity, project as project_entity, task as task_entity,
};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

/// 项目仓库实现
///
/// 项目由外部管理，这里只提供只读访问。
#[derive(Clone)]
pub struct ProjectRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<project_entity::Model> for Project {
    fn from(model: project_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            feed_url: model.feed_url,
            is_enabled: model.is_enabled,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryImpl {
    async fn find_all_enabled(&self) -> Result<Vec<Project>, RepositoryError> {
        let models = project_entity::Entity::find()
            .filter(project_entity::Column::IsEnabled.eq(true))
            .order_by_asc(project_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let model = project_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_task_id(&self, task_id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let Some(task) = task_entity::Entity::find_by_id(task_id)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };

        let Some(pipeline) = pipeline_entity::Entity::find_by_id(task.pipeline_id)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };

        self.find_by_id(pipeline.project_id).await
    }
}
