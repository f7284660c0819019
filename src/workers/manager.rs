// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::workers::worker::{run_periodic, Worker};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// 工作管理器
///
/// 为每个工作器启动独立的循环任务，所有循环共享同一个取消令牌。
pub struct WorkerManager {
    interval: Duration,
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerManager {
    pub fn new(interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            interval,
            shutdown,
            handles: Vec::new(),
        }
    }

    /// 启动一个工作器循环
    pub fn spawn(&mut self, worker: Arc<dyn Worker>) {
        let interval = self.interval;
        let shutdown = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            run_periodic(worker.as_ref(), interval, shutdown).await;
        });
        self.handles.push(handle);
    }

    /// 已启动的工作器数量
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 取消所有循环并等待它们退出
    ///
    /// 正在进行的轮次会在下一个取消检查点返回，不会修改任务状态。
    pub async fn shutdown(&mut self) {
        info!("Shutting down workers...");
        self.shutdown.cancel();

        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!("Worker task terminated abnormally: {}", e);
            }
        }

        info!("Workers shut down successfully");
    }

    /// 等待关闭信号并关闭工作进程
    ///
    /// 收到 Ctrl-C、SIGTERM 或令牌被其他组件取消时返回。
    pub async fn wait_for_shutdown(&mut self) {
        tokio::select! {
            result = signal::ctrl_c() => match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(err) => error!("Unable to listen for shutdown signal: {}", err),
            },
            _ = terminate() => info!("SIGTERM received"),
            _ = self.shutdown.cancelled() => info!("Shutdown requested"),
        }

        self.shutdown().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            error!("Unable to listen for SIGTERM: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
