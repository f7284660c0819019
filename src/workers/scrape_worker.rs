// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::post::{NewPostItem, Post};
use crate::domain::models::task::{DomainError, Task, TaskStatus, TaskType};
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::feed_reader::{FeedError, FeedReader};
use crate::infrastructure::metrics;
use crate::utils::clock::Clock;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 单个抓取任务的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// 新文章已保存，任务完成
    Published { post_id: Uuid, items: usize },
    /// 流水线已有文章，直接完成任务
    Reused { post_id: Uuid },
    /// 没有新条目，任务保持就绪
    NoNewItems,
    /// 距上一篇文章的时间不足最小间隔
    Throttled,
}

/// 抓取工作器
///
/// 每轮先把所有等待中的抓取任务提升为就绪，
/// 再为每个就绪任务读取订阅源并生成文章。
pub struct ScrapeWorker {
    tasks: Arc<dyn TaskRepository>,
    projects: Arc<dyn ProjectRepository>,
    posts: Arc<dyn PostRepository>,
    feed_reader: Arc<dyn FeedReader>,
    clock: Arc<dyn Clock>,
    feed_timeout: Duration,
    min_scrape_interval: chrono::Duration,
}

impl ScrapeWorker {
    /// 创建新的抓取工作器实例
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        projects: Arc<dyn ProjectRepository>,
        posts: Arc<dyn PostRepository>,
        feed_reader: Arc<dyn FeedReader>,
        clock: Arc<dyn Clock>,
        feed_timeout: Duration,
        min_scrape_interval: chrono::Duration,
    ) -> Self {
        Self {
            tasks,
            projects,
            posts,
            feed_reader,
            clock,
            feed_timeout,
            min_scrape_interval,
        }
    }

    /// 将所有等待中的抓取任务提升为就绪
    pub async fn promote_waiting(&self) -> Result<usize, WorkerError> {
        let waiting = self
            .tasks
            .filter(TaskType::Scrape, TaskStatus::Waiting)
            .await?;

        let mut promoted = 0;
        for task in waiting {
            let task_id = task.id;
            match self.transition(task, Task::promote).await {
                Ok(()) => promoted += 1,
                Err(e) => warn!(%task_id, error = %e, "Failed to promote scrape task"),
            }
        }

        Ok(promoted)
    }

    /// 执行所有就绪的抓取任务
    ///
    /// 令牌取消后立即返回 `WorkerError::Cancelled`，剩余任务保持原状态。
    pub async fn execute_ready(
        &self,
        shutdown: &CancellationToken,
    ) -> Result<Vec<(Uuid, ScrapeOutcome)>, WorkerError> {
        let ready = self.tasks.filter(TaskType::Scrape, TaskStatus::Ready).await?;

        let mut outcomes = Vec::with_capacity(ready.len());
        for task in ready {
            if shutdown.is_cancelled() {
                return Err(WorkerError::Cancelled);
            }

            let task_id = task.id;
            match self.process_task(task, shutdown).await {
                Ok(outcome) => outcomes.push((task_id, outcome)),
                Err(WorkerError::Cancelled) => return Err(WorkerError::Cancelled),
                Err(e) => warn!(%task_id, error = %e, "Scrape task left ready"),
            }
        }

        Ok(outcomes)
    }

    #[instrument(skip(self, task, shutdown), fields(task_id = %task.id, pipeline_id = %task.pipeline_id))]
    async fn process_task(
        &self,
        task: Task,
        shutdown: &CancellationToken,
    ) -> Result<ScrapeOutcome, WorkerError> {
        let project = self
            .projects
            .find_by_task_id(task.id)
            .await?
            .ok_or_else(|| WorkerError::NotFound(format!("project for task {}", task.id)))?;

        // A post without a finished task means the previous attempt stopped between writes.
        if let Some(post) = self.posts.find_by_pipeline(task.pipeline_id).await? {
            self.transition(task, Task::finish).await?;
            info!(post_id = %post.id, "Existing post reused");
            return Ok(ScrapeOutcome::Reused { post_id: post.id });
        }

        let last_post = self.posts.find_last_for_project(project.id).await?;
        let (checkpoint, is_first_run) = match &last_post {
            Some(post) => (post.updated_at.with_timezone(&Utc), false),
            None => (project.updated_at.with_timezone(&Utc), true),
        };

        if !is_first_run
            && self.min_scrape_interval > chrono::Duration::zero()
            && self.clock.now() - checkpoint < self.min_scrape_interval
        {
            debug!(%checkpoint, "Scrape throttled");
            return Ok(ScrapeOutcome::Throttled);
        }

        let read = self
            .feed_reader
            .read_since(&project.feed_url, checkpoint, is_first_run);
        let items = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return Err(WorkerError::Cancelled),
            result = tokio::time::timeout(self.feed_timeout, read) => {
                match result {
                    Ok(items) => items,
                    Err(_) => Err(FeedError::Timeout),
                }
            }
        };

        let items = match items {
            Ok(items) => items,
            Err(e) => {
                metrics::record_feed_failure();
                return Err(e.into());
            }
        };

        if items.is_empty() {
            debug!(%checkpoint, is_first_run, "No new feed items");
            return Ok(ScrapeOutcome::NoNewItems);
        }

        let new_items: Vec<NewPostItem> = items.iter().map(NewPostItem::from).collect();
        let post = self
            .posts
            .create(
                task.pipeline_id,
                project.id,
                &Post::title_for(&project.name),
                &new_items,
            )
            .await?;
        metrics::record_feed_items(new_items.len());

        self.transition(task, Task::finish).await?;

        info!(
            project_id = %project.id,
            post_id = %post.id,
            items = new_items.len(),
            "Post created from feed"
        );

        Ok(ScrapeOutcome::Published {
            post_id: post.id,
            items: new_items.len(),
        })
    }

    async fn transition<F>(&self, task: Task, step: F) -> Result<(), WorkerError>
    where
        F: FnOnce(Task) -> Result<Task, DomainError>,
    {
        let task = step(task)?;
        self.tasks.update_status(&task).await?;
        metrics::record_task_transition(task.task_type, task.status);
        debug!(task_id = %task.id, status = %task.status, "Scrape task transitioned");
        Ok(())
    }
}

#[async_trait]
impl Worker for ScrapeWorker {
    async fn tick(&self, shutdown: &CancellationToken) -> Result<(), WorkerError> {
        self.promote_waiting().await?;
        self.execute_ready(shutdown).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "scrape_worker"
    }
}

#[cfg(test)]
#[path = "scrape_worker_test.rs"]
mod tests;
