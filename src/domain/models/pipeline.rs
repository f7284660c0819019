// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::{Task, TaskType};

/// 流水线实体
///
/// 表示项目的一次“检查新内容，然后通知订阅者”的周期。
/// 流水线创建后不会被修改，也不会被核心逻辑删除。
///
/// `sequence` 在项目内从1开始严格递增，(project_id, sequence)
/// 在存储层唯一，因此两个协调器基于同一个前驱创建流水线时只会得到一行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// 流水线唯一标识符
    pub id: Uuid,
    /// 所属项目ID
    pub project_id: Uuid,
    /// 项目内序号
    pub sequence: i64,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

impl Pipeline {
    /// 下一条流水线的序号
    pub fn next_sequence(last: Option<&Pipeline>) -> i64 {
        last.map(|p| p.sequence + 1).unwrap_or(1)
    }

    /// 判断流水线是否已完成
    ///
    /// 当且仅当该流水线同时存在状态为Finished的抓取任务和发布任务时返回true。
    /// 不属于该流水线的任务会被忽略。
    pub fn is_finished(&self, tasks: &[Task]) -> bool {
        let finished = |task_type: TaskType| {
            tasks
                .iter()
                .any(|t| t.pipeline_id == self.id && t.task_type == task_type && t.is_finished())
        };

        finished(TaskType::Scrape) && finished(TaskType::Publish)
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
