// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::pipeline::Pipeline;
use crate::domain::repositories::pipeline_repository::PipelineRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::pipeline as pipeline_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 流水线仓库实现
#[derive(Clone)]
pub struct PipelineRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PipelineRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<pipeline_entity::Model> for Pipeline {
    fn from(model: pipeline_entity::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            sequence: model.sequence,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl PipelineRepository for PipelineRepositoryImpl {
    async fn create(&self, project_id: Uuid, sequence: i64) -> Result<Pipeline, RepositoryError> {
        let now = Utc::now();
        let model = pipeline_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            sequence: Set(sequence),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = pipeline_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    pipeline_entity::Column::ProjectId,
                    pipeline_entity::Column::Sequence,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(self.db.as_ref())
            .await;

        match inserted {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }

        let model = pipeline_entity::Entity::find()
            .filter(pipeline_entity::Column::ProjectId.eq(project_id))
            .filter(pipeline_entity::Column::Sequence.eq(sequence))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(model.into())
    }

    async fn find_last(&self, project_id: Uuid) -> Result<Option<Pipeline>, RepositoryError> {
        let model = pipeline_entity::Entity::find()
            .filter(pipeline_entity::Column::ProjectId.eq(project_id))
            .order_by_desc(pipeline_entity::Column::Sequence)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pipeline>, RepositoryError> {
        let model = pipeline_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn list_for_project(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Pipeline>, RepositoryError> {
        let models = pipeline_entity::Entity::find()
            .filter(pipeline_entity::Column::ProjectId.eq(project_id))
            .order_by_desc(pipeline_entity::Column::Sequence)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
