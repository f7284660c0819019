// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::pipeline::Pipeline;
use async_trait::async_trait;
use uuid::Uuid;

/// 流水线仓库特质
#[async_trait]
pub trait PipelineRepository: Send + Sync {
    /// 创建流水线
    ///
    /// (project_id, sequence) 已存在时返回已有的流水线。
    async fn create(&self, project_id: Uuid, sequence: i64) -> Result<Pipeline, RepositoryError>;
    /// 获取项目最近的一条流水线
    async fn find_last(&self, project_id: Uuid) -> Result<Option<Pipeline>, RepositoryError>;
    /// 根据ID查找流水线
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pipeline>, RepositoryError>;
    /// 按序号倒序列出项目的流水线
    async fn list_for_project(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Pipeline>, RepositoryError>;
}
