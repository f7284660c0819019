// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{DomainError, Task, TaskStatus, TaskType};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::infrastructure::database::entities::task as task_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};
use std::sync::Arc;
use uuid::Uuid;

/// 任务仓库实现
///
/// 基于SeaORM实现的任务数据访问层。
/// `(pipeline_id, task_type)` 上的唯一索引保证每个流水线每种类型至多一个任务。
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<task_entity::Model> for Task {
    type Error = DomainError;

    fn try_from(model: task_entity::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            pipeline_id: model.pipeline_id,
            task_type: model.task_type.parse()?,
            status: model.status.parse()?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Task> for task_entity::ActiveModel {
    fn from(task: &Task) -> Self {
        Self {
            id: Set(task.id),
            pipeline_id: Set(task.pipeline_id),
            task_type: Set(task.task_type.to_string()),
            status: Set(task.status.to_string()),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
        }
    }
}

fn into_tasks(models: Vec<task_entity::Model>) -> Result<Vec<Task>, RepositoryError> {
    models
        .into_iter()
        .map(|m| Task::try_from(m).map_err(RepositoryError::from))
        .collect()
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn create(
        &self,
        pipeline_id: Uuid,
        task_type: TaskType,
    ) -> Result<Task, RepositoryError> {
        let task = Task::new(pipeline_id, task_type);
        let model = task_entity::ActiveModel::from(&task);

        let inserted = task_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    task_entity::Column::PipelineId,
                    task_entity::Column::TaskType,
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

        // A concurrent reconciler may have won the insert; return whichever row exists.
        self.find_by_type(pipeline_id, task_type)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_type(
        &self,
        pipeline_id: Uuid,
        task_type: TaskType,
    ) -> Result<Option<Task>, RepositoryError> {
        let model = task_entity::Entity::find()
            .filter(task_entity::Column::PipelineId.eq(pipeline_id))
            .filter(task_entity::Column::TaskType.eq(task_type.to_string()))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Task::try_from).transpose()?)
    }

    async fn filter(
        &self,
        task_type: TaskType,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::TaskType.eq(task_type.to_string()))
            .filter(task_entity::Column::Status.eq(status.to_string()))
            .order_by_asc(task_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        into_tasks(models)
    }

    async fn update_status(&self, task: &Task) -> Result<(), RepositoryError> {
        let model = task_entity::ActiveModel {
            id: Unchanged(task.id),
            status: Set(task.status.to_string()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        match model.update(self.db.as_ref()).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(RepositoryError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_pipeline(&self, pipeline_id: Uuid) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::PipelineId.eq(pipeline_id))
            .order_by_asc(task_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        into_tasks(models)
    }
}
