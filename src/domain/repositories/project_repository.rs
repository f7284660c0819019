// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::project::Project;
use async_trait::async_trait;
use uuid::Uuid;

/// 项目仓库特质
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// 获取所有启用的项目
    async fn find_all_enabled(&self) -> Result<Vec<Project>, RepositoryError>;
    /// 根据ID查找项目
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;
    /// 根据任务ID查找其所属项目（任务 → 流水线 → 项目）
    async fn find_by_task_id(&self, task_id: Uuid) -> Result<Option<Project>, RepositoryError>;
}
