// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 任务实体
///
/// 表示流水线中的一个工作单元。每条流水线对每种任务类型
/// 最多只有一个任务；任务状态只能单调向前推进，从不回退。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 所属流水线ID
    pub pipeline_id: Uuid,
    /// 任务类型，决定由哪个工作器处理
    pub task_type: TaskType,
    /// 任务状态
    pub status: TaskStatus,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 任务类型枚举
///
/// 抓取任务必须先于发布任务完成，见 [`TaskType::ALL`] 的顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// 抓取任务：读取订阅源并生成文章
    Scrape,
    /// 发布任务：向所有订阅者发送文章
    Publish,
}

impl TaskType {
    /// 每条流水线需要的任务类型，按创建顺序排列
    pub const ALL: [TaskType; 2] = [TaskType::Scrape, TaskType::Publish];
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskType::Scrape => write!(f, "Scrape"),
            TaskType::Publish => write!(f, "Publish"),
        }
    }
}

impl FromStr for TaskType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scrape" => Ok(TaskType::Scrape),
            "Publish" => Ok(TaskType::Publish),
            other => Err(DomainError::UnknownTaskType(other.to_string())),
        }
    }
}

/// 任务状态枚举
///
/// 状态转换遵循以下流程：
/// Waiting → Ready → Finished/Failed
///
/// `Running` 与 `Aborted` 为保留状态，当前的转换逻辑不会进入这两个状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    /// 等待中，任务已创建但前置条件尚未满足
    #[default]
    Waiting,
    /// 就绪，工作器可以执行该任务
    Ready,
    /// 执行中（保留）
    Running,
    /// 已完成
    Finished,
    /// 已失败，终止状态
    Failed,
    /// 已中止（保留）
    Aborted,
}

impl TaskStatus {
    /// 是否为终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Finished | TaskStatus::Failed | TaskStatus::Aborted
        )
    }

    /// 判断从当前状态到目标状态的转换是否合法
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Waiting, TaskStatus::Ready)
                | (TaskStatus::Ready, TaskStatus::Finished)
                | (TaskStatus::Ready, TaskStatus::Failed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Waiting => write!(f, "Waiting"),
            TaskStatus::Ready => write!(f, "Ready"),
            TaskStatus::Running => write!(f, "Running"),
            TaskStatus::Finished => write!(f, "Finished"),
            TaskStatus::Failed => write!(f, "Failed"),
            TaskStatus::Aborted => write!(f, "Aborted"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Waiting" => Ok(TaskStatus::Waiting),
            "Ready" => Ok(TaskStatus::Ready),
            "Running" => Ok(TaskStatus::Running),
            "Finished" => Ok(TaskStatus::Finished),
            "Failed" => Ok(TaskStatus::Failed),
            "Aborted" => Ok(TaskStatus::Aborted),
            other => Err(DomainError::UnknownTaskStatus(other.to_string())),
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 无效的状态转换
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: TaskStatus, to: TaskStatus },

    /// 存储中出现未知的任务类型
    #[error("Unknown task type: {0}")]
    UnknownTaskType(String),

    /// 存储中出现未知的任务状态
    #[error("Unknown task status: {0}")]
    UnknownTaskStatus(String),
}

impl Task {
    /// 创建一个新的等待中任务
    ///
    /// # 参数
    ///
    /// * `pipeline_id` - 所属流水线ID
    /// * `task_type` - 任务类型
    pub fn new(pipeline_id: Uuid, task_type: TaskType) -> Self {
        let now = Utc::now().into();
        Self {
            id: Uuid::new_v4(),
            pipeline_id,
            task_type,
            status: TaskStatus::Waiting,
            created_at: now,
            updated_at: now,
        }
    }

    fn transition(mut self, next: TaskStatus) -> Result<Self, DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now().into();
        Ok(self)
    }

    /// 晋升任务
    ///
    /// 将任务状态从Waiting变更为Ready
    pub fn promote(self) -> Result<Self, DomainError> {
        self.transition(TaskStatus::Ready)
    }

    /// 完成任务
    ///
    /// 将任务状态从Ready变更为Finished
    pub fn finish(self) -> Result<Self, DomainError> {
        self.transition(TaskStatus::Finished)
    }

    /// 标记任务失败
    ///
    /// 将任务状态从Ready变更为Failed。失败是终止状态，不会被自动重新调度。
    pub fn fail(self) -> Result<Self, DomainError> {
        self.transition(TaskStatus::Failed)
    }

    pub fn is_finished(&self) -> bool {
        self.status == TaskStatus::Finished
    }
}

#[cfg(test)]
#[path = "task_test.rs"]
mod tests;
