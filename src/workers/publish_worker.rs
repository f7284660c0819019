// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::PublisherSettings;
use crate::domain::models::email_template::EmailTemplate;
use crate::domain::models::post::Post;
use crate::domain::models::subscription::Subscription;
use crate::domain::models::task::{DomainError, Task, TaskStatus, TaskType};
use crate::domain::repositories::email_template_repository::EmailTemplateRepository;
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::subscription_repository::SubscriptionRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::email_transport::{Email, EmailError, EmailTransport, Mailbox};
use crate::domain::services::template_renderer::{TemplateData, TemplateItem, TemplateRenderer};
use crate::domain::services::token_encoder::TokenEncoder;
use crate::infrastructure::metrics;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 发布任务的投递结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOutcome {
    /// 成功投递的邮件数
    pub delivered: usize,
    /// 订阅者总数
    pub total: usize,
}

impl PublishOutcome {
    pub fn is_complete(&self) -> bool {
        self.delivered == self.total
    }
}

/// 发布工作器依赖的仓库集合
#[derive(Clone)]
pub struct PublishRepositories {
    pub tasks: Arc<dyn TaskRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub templates: Arc<dyn EmailTemplateRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
}

/// 发布工作器
///
/// 抓取任务完成后把发布任务提升为就绪，
/// 然后把流水线的文章逐一发送给项目的所有订阅者。
pub struct PublishWorker {
    repos: PublishRepositories,
    transport: Arc<dyn EmailTransport>,
    renderer: Arc<dyn TemplateRenderer>,
    tokens: Arc<dyn TokenEncoder>,
    publisher: PublisherSettings,
    send_timeout: Duration,
}

impl PublishWorker {
    /// 创建新的发布工作器实例
    pub fn new(
        repos: PublishRepositories,
        transport: Arc<dyn EmailTransport>,
        renderer: Arc<dyn TemplateRenderer>,
        tokens: Arc<dyn TokenEncoder>,
        publisher: PublisherSettings,
        send_timeout: Duration,
    ) -> Self {
        Self {
            repos,
            transport,
            renderer,
            tokens,
            publisher,
            send_timeout,
        }
    }

    /// 提升抓取已完成的发布任务
    ///
    /// 同一流水线的抓取任务缺失或未完成时，发布任务保持等待。
    pub async fn promote_waiting(&self) -> Result<usize, WorkerError> {
        let waiting = self
            .repos
            .tasks
            .filter(TaskType::Publish, TaskStatus::Waiting)
            .await?;

        let mut promoted = 0;
        for task in waiting {
            let task_id = task.id;
            match self.promote_if_scraped(task).await {
                Ok(true) => promoted += 1,
                Ok(false) => {}
                Err(e) => warn!(%task_id, error = %e, "Failed to promote publish task"),
            }
        }

        Ok(promoted)
    }

    async fn promote_if_scraped(&self, task: Task) -> Result<bool, WorkerError> {
        let scraped = self
            .repos
            .tasks
            .find_by_type(task.pipeline_id, TaskType::Scrape)
            .await?
            .is_some_and(|scrape| scrape.is_finished());

        if !scraped {
            return Ok(false);
        }

        self.transition(task, Task::promote).await?;
        Ok(true)
    }

    /// 执行所有就绪的发布任务
    ///
    /// 返回每个已结束任务的投递结果；暂时性错误的任务不在结果中且保持就绪。
    /// 取消令牌只在任务开始投递前检查：投递一旦开始，该任务会发送给全部订阅者并结束。
    pub async fn execute_ready(
        &self,
        shutdown: &CancellationToken,
    ) -> Result<Vec<(Uuid, PublishOutcome)>, WorkerError> {
        let ready = self
            .repos
            .tasks
            .filter(TaskType::Publish, TaskStatus::Ready)
            .await?;

        let mut outcomes = Vec::with_capacity(ready.len());
        for task in ready {
            if shutdown.is_cancelled() {
                return Err(WorkerError::Cancelled);
            }

            let task_id = task.id;
            let started = Instant::now();
            match self.process_task(task, shutdown).await {
                Ok(outcome) => {
                    metrics::record_publish_duration(started.elapsed());
                    outcomes.push((task_id, outcome));
                }
                Err(WorkerError::Cancelled) => return Err(WorkerError::Cancelled),
                Err(e) => warn!(%task_id, error = %e, "Publish task not completed"),
            }
        }

        Ok(outcomes)
    }

    #[instrument(skip(self, task, shutdown), fields(task_id = %task.id, pipeline_id = %task.pipeline_id))]
    async fn process_task(
        &self,
        task: Task,
        shutdown: &CancellationToken,
    ) -> Result<PublishOutcome, WorkerError> {
        let Some(post) = self.repos.posts.find_by_pipeline(task.pipeline_id).await? else {
            warn!("Publish task has no post to send");
            self.transition(task, Task::fail).await?;
            return Err(WorkerError::NotFound("post for pipeline".to_string()));
        };

        let project = self
            .repos
            .projects
            .find_by_task_id(task.id)
            .await?
            .ok_or_else(|| WorkerError::NotFound(format!("project for task {}", task.id)))?;
        let template = self
            .repos
            .templates
            .find_active(project.id)
            .await?
            .ok_or_else(|| WorkerError::NotFound(format!("active template for {}", project.id)))?;
        let subscriptions = self.repos.subscriptions.find_all(project.id).await?;
        let items: Vec<TemplateItem> = self
            .repos
            .posts
            .find_items(post.id)
            .await?
            .iter()
            .map(TemplateItem::from)
            .collect();

        let mut outcome = PublishOutcome {
            delivered: 0,
            total: subscriptions.len(),
        };

        // Last cancellation point: a task that has started sending always settles.
        if shutdown.is_cancelled() {
            return Err(WorkerError::Cancelled);
        }

        for subscription in &subscriptions {
            match self.deliver(&post, &template, &items, subscription).await {
                Ok(()) => {
                    outcome.delivered += 1;
                    metrics::record_email(true);
                }
                Err(e) => {
                    metrics::record_email(false);
                    warn!(
                        subscription_id = %subscription.id,
                        error = %e,
                        "Failed to deliver newsletter"
                    );
                }
            }
        }

        if outcome.is_complete() {
            self.transition(task, Task::finish).await?;
        } else {
            self.transition(task, Task::fail).await?;
        }

        info!(
            project_id = %project.id,
            post_id = %post.id,
            delivered = outcome.delivered,
            total = outcome.total,
            "Newsletter published"
        );

        Ok(outcome)
    }

    async fn deliver(
        &self,
        post: &Post,
        template: &EmailTemplate,
        items: &[TemplateItem],
        subscription: &Subscription,
    ) -> Result<(), WorkerError> {
        let token = self.tokens.encode(subscription)?;
        let data = TemplateData {
            title: post.title.clone(),
            unsubscribe_link: self.unsubscribe_link(&token),
            items: items.to_vec(),
        };
        let rendered = self.renderer.render(template, &data)?;

        let email = Email {
            from: Mailbox::new(&self.publisher.name, &self.publisher.email),
            to: Mailbox::new("", &subscription.email),
            subject: rendered.subject,
            body: rendered.body,
            text: rendered.text,
        };

        tokio::time::timeout(self.send_timeout, self.transport.send(&email))
            .await
            .map_err(|_| EmailError::Timeout)??;

        debug!(subscription_id = %subscription.id, "Newsletter delivered");
        Ok(())
    }

    fn unsubscribe_link(&self, token: &str) -> String {
        format!(
            "https://{}/unsubscribe?token={}",
            self.publisher.application_domain, token
        )
    }

    async fn transition<F>(&self, task: Task, step: F) -> Result<(), WorkerError>
    where
        F: FnOnce(Task) -> Result<Task, DomainError>,
    {
        let task = step(task)?;
        self.repos.tasks.update_status(&task).await?;
        metrics::record_task_transition(task.task_type, task.status);
        debug!(task_id = %task.id, status = %task.status, "Publish task transitioned");
        Ok(())
    }
}

#[async_trait]
impl Worker for PublishWorker {
    async fn tick(&self, shutdown: &CancellationToken) -> Result<(), WorkerError> {
        self.promote_waiting().await?;
        self.execute_ready(shutdown).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "publish_worker"
    }
}

#[cfg(test)]
#[path = "publish_worker_test.rs"]
mod tests;
