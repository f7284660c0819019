// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::project::Project;
use crate::domain::models::task::{Task, TaskType};
use crate::domain::repositories::pipeline_repository::PipelineRepository;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::infrastructure::metrics;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 任务协调器
///
/// 为每个启用项目的最新流水线补齐 `Scrape` 与 `Publish` 任务。
/// 重复执行不会产生重复任务。
pub struct TaskReconciler {
    projects: Arc<dyn ProjectRepository>,
    pipelines: Arc<dyn PipelineRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl TaskReconciler {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        pipelines: Arc<dyn PipelineRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            projects,
            pipelines,
            tasks,
        }
    }

    /// 协调单个项目，返回本次新创建的任务
    ///
    /// 某一类型的查询或创建失败只记录警告，其余类型照常补齐，
    /// 缺失的任务留给下一轮。
    pub async fn reconcile_project(&self, project: &Project) -> Result<Vec<Task>, WorkerError> {
        let Some(pipeline) = self.pipelines.find_last(project.id).await? else {
            return Ok(Vec::new());
        };

        let mut created = Vec::new();
        for task_type in TaskType::ALL {
            match self.tasks.find_by_type(pipeline.id, task_type).await {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(e) => {
                    warn!(pipeline_id = %pipeline.id, %task_type, error = %e, "Task lookup failed");
                    continue;
                }
            }

            let task = match self.tasks.create(pipeline.id, task_type).await {
                Ok(task) => task,
                Err(e) => {
                    warn!(pipeline_id = %pipeline.id, %task_type, error = %e, "Task creation failed");
                    continue;
                }
            };
            metrics::record_task_created(task_type);
            info!(
                project_id = %project.id,
                pipeline_id = %pipeline.id,
                task_id = %task.id,
                %task_type,
                "Task created"
            );
            created.push(task);
        }

        Ok(created)
    }
}

#[async_trait]
impl Worker for TaskReconciler {
    async fn tick(&self, _shutdown: &CancellationToken) -> Result<(), WorkerError> {
        let projects = self.projects.find_all_enabled().await?;

        for project in &projects {
            if let Err(e) = self.reconcile_project(project).await {
                warn!(project_id = %project.id, error = %e, "Failed to reconcile tasks");
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "task_reconciler"
    }
}
