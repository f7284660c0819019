// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::WorkerError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Worker trait定义
///
/// 所有后台循环都必须实现此trait。每个循环只通过持久化的状态字段协调，
/// 彼此之间不共享内存状态。
#[async_trait]
pub trait Worker: Send + Sync {
    /// 执行一轮处理
    ///
    /// 单个项目或任务的错误在内部记录；返回的错误表示整轮失败。
    async fn tick(&self, shutdown: &CancellationToken) -> Result<(), WorkerError>;

    /// 获取工作器名称
    fn name(&self) -> &str;
}

/// 按固定间隔运行工作器，直到取消令牌被触发
///
/// 取消后不会再开始新的轮次；正在进行的轮次由工作器自行决定何时退出。
pub async fn run_periodic<W>(worker: &W, interval: Duration, shutdown: CancellationToken)
where
    W: Worker + ?Sized,
{
    info!(worker = worker.name(), "Worker started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match worker.tick(&shutdown).await {
            Ok(()) => {}
            Err(WorkerError::Cancelled) => debug!(worker = worker.name(), "Tick cancelled"),
            Err(e) => error!(worker = worker.name(), error = %e, "Worker tick failed"),
        }
    }

    info!(worker = worker.name(), "Worker stopped");
}
