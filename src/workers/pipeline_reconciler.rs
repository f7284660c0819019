// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::pipeline::Pipeline;
use crate::domain::models::project::Project;
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

/// 流水线协调器
///
/// 保证每个启用的项目恰好有一个未完成的流水线：
/// 项目没有流水线时创建第一个，最后一个流水线完成后创建下一个。
pub struct PipelineReconciler {
    projects: Arc<dyn ProjectRepository>,
    pipelines: Arc<dyn PipelineRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl PipelineReconciler {
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

    /// 协调单个项目，返回新创建的流水线
    pub async fn reconcile_project(
        &self,
        project: &Project,
    ) -> Result<Option<Pipeline>, WorkerError> {
        let last = self.pipelines.find_last(project.id).await?;

        if let Some(last) = &last {
            let tasks = self.tasks.find_by_pipeline(last.id).await?;
            if !last.is_finished(&tasks) {
                return Ok(None);
            }
        }

        let sequence = Pipeline::next_sequence(last.as_ref());
        let pipeline = self.pipelines.create(project.id, sequence).await?;
        metrics::record_pipeline_created();

        info!(
            project_id = %project.id,
            pipeline_id = %pipeline.id,
            sequence,
            "Pipeline created"
        );

        Ok(Some(pipeline))
    }
}

#[async_trait]
impl Worker for PipelineReconciler {
    async fn tick(&self, _shutdown: &CancellationToken) -> Result<(), WorkerError> {
        let projects = self.projects.find_all_enabled().await?;

        for project in &projects {
            if let Err(e) = self.reconcile_project(project).await {
                warn!(project_id = %project.id, error = %e, "Failed to reconcile pipeline");
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "pipeline_reconciler"
    }
}

#[cfg(test)]
#[path = "pipeline_reconciler_test.rs"]
mod tests;
