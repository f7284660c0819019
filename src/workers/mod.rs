// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 四个独立的后台循环：流水线协调器、任务协调器、抓取工作器与发布工作器。
/// 循环之间只通过持久化的任务状态协调。
pub mod manager;
pub mod pipeline_reconciler;
pub mod publish_worker;
pub mod scrape_worker;
pub mod task_reconciler;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_support;

pub use worker::Worker;
