// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::pipeline::Pipeline;
use crate::domain::models::task::{Task, TaskStatus, TaskType};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::presentation::errors::AppError;
use crate::presentation::state::AppState;
use axum::extract::{Extension, Path, Query};
use axum::Json;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct PipelineQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskView {
    pub id: Uuid,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            task_type: task.task_type,
            status: task.status,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineView {
    pub id: Uuid,
    pub sequence: i64,
    pub created_at: DateTime<FixedOffset>,
    pub finished: bool,
    pub tasks: Vec<TaskView>,
}

impl PipelineView {
    fn new(pipeline: Pipeline, tasks: Vec<Task>) -> Self {
        Self {
            id: pipeline.id,
            sequence: pipeline.sequence,
            created_at: pipeline.created_at,
            finished: pipeline.is_finished(&tasks),
            tasks: tasks.into_iter().map(TaskView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineListResponse {
    pub project_id: Uuid,
    pub pipelines: Vec<PipelineView>,
}

/// 查询项目最近的流水线及其任务状态
///
/// `limit` 默认为10，最大100。
pub async fn list_pipelines(
    Extension(state): Extension<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<PipelineQuery>,
) -> Result<Json<PipelineListResponse>, AppError> {
    state
        .projects
        .find_by_id(project_id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let pipelines = state.pipelines.list_for_project(project_id, limit).await?;

    let mut views = Vec::with_capacity(pipelines.len());
    for pipeline in pipelines {
        let tasks = state.tasks.find_by_pipeline(pipeline.id).await?;
        views.push(PipelineView::new(pipeline, tasks));
    }

    Ok(Json(PipelineListResponse {
        project_id,
        pipelines: views,
    }))
}
