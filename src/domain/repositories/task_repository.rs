// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{DomainError, Task, TaskStatus, TaskType};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 存储中的数据无法映射为领域模型
    #[error("Corrupted record: {0}")]
    Corrupted(#[from] DomainError),
}

/// 任务仓库特质
///
/// 定义任务数据访问接口。任务只会被创建与更新状态，从不删除。
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 创建任务
    ///
    /// 以“不存在则插入”的方式执行：若流水线中已存在同类型任务，
    /// 返回已有任务而不是创建第二个。新任务的状态为Waiting。
    async fn create(&self, pipeline_id: Uuid, task_type: TaskType)
        -> Result<Task, RepositoryError>;
    /// 查找流水线中指定类型的任务
    async fn find_by_type(
        &self,
        pipeline_id: Uuid,
        task_type: TaskType,
    ) -> Result<Option<Task>, RepositoryError>;
    /// 按类型与状态筛选任务，按创建时间升序
    async fn filter(
        &self,
        task_type: TaskType,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError>;
    /// 仅更新任务状态
    async fn update_status(&self, task: &Task) -> Result<(), RepositoryError>;
    /// 列出流水线的所有任务
    async fn find_by_pipeline(&self, pipeline_id: Uuid) -> Result<Vec<Task>, RepositoryError>;
}
