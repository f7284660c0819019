// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 工作器单元测试使用的内存实现

use crate::domain::models::email_template::EmailTemplate;
use crate::domain::models::pipeline::Pipeline;
use crate::domain::models::post::{NewPostItem, Post, PostItem};
use crate::domain::models::project::Project;
use crate::domain::models::subscription::Subscription;
use crate::domain::models::task::{Task, TaskStatus, TaskType};
use crate::domain::repositories::email_template_repository::EmailTemplateRepository;
use crate::domain::repositories::pipeline_repository::PipelineRepository;
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::subscription_repository::SubscriptionRepository;
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::domain::services::email_transport::{Email, EmailError, EmailTransport};
use crate::domain::services::feed_reader::{FeedError, FeedItem, FeedReader};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use sea_orm::DbErr;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Default)]
struct State {
    projects: Vec<Project>,
    pipelines: Vec<Pipeline>,
    tasks: Vec<Task>,
    posts: Vec<Post>,
    items: Vec<PostItem>,
    subscriptions: Vec<Subscription>,
    templates: Vec<EmailTemplate>,
}

/// 实现全部仓库接口的内存存储
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    failing_templates: Mutex<HashSet<Uuid>>,
    failing_pipelines: Mutex<HashSet<Uuid>>,
    failing_tasks: Mutex<HashSet<(Uuid, TaskType)>>,
}

fn unavailable(what: &str) -> RepositoryError {
    RepositoryError::Database(DbErr::Custom(format!("{} unavailable", what)))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&self, name: &str, is_enabled: bool) -> Project {
        let now = Utc::now().into();
        let project = Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            feed_url: format!("https://{}.example.com/feed.xml", name),
            is_enabled,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().projects.push(project.clone());
        project
    }

    pub fn add_subscription(&self, project_id: Uuid, email: &str) -> Subscription {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            project_id,
            email: email.to_string(),
            created_at: Utc::now().into(),
        };
        self.state
            .lock()
            .unwrap()
            .subscriptions
            .push(subscription.clone());
        subscription
    }

    pub fn add_template(&self, project_id: Uuid, subject: &str, content: &str) -> EmailTemplate {
        let now = Utc::now().into();
        let template = EmailTemplate {
            id: Uuid::new_v4(),
            project_id,
            name: "default".to_string(),
            is_active: true,
            subject: subject.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().templates.push(template.clone());
        template
    }

    /// 直接写入指定状态的任务，绕过状态机
    pub fn put_task(&self, pipeline_id: Uuid, task_type: TaskType, status: TaskStatus) -> Task {
        let mut task = Task::new(pipeline_id, task_type);
        task.status = status;
        self.state.lock().unwrap().tasks.push(task.clone());
        task
    }

    pub fn set_post_updated_at(&self, pipeline_id: Uuid, updated_at: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        if let Some(post) = state.posts.iter_mut().find(|p| p.pipeline_id == pipeline_id) {
            post.updated_at = updated_at.into();
        }
    }

    /// 让指定项目的模板查询返回数据库错误
    pub fn fail_template_lookups_for(&self, project_id: Uuid, fail: bool) {
        let mut failing = self.failing_templates.lock().unwrap();
        if fail {
            failing.insert(project_id);
        } else {
            failing.remove(&project_id);
        }
    }

    pub fn fail_pipeline_creates_for(&self, project_id: Uuid) {
        self.failing_pipelines.lock().unwrap().insert(project_id);
    }

    pub fn fail_task_creates_for(&self, pipeline_id: Uuid, task_type: TaskType) {
        self.failing_tasks
            .lock()
            .unwrap()
            .insert((pipeline_id, task_type));
    }

    pub fn pipelines(&self) -> Vec<Pipeline> {
        self.state.lock().unwrap().pipelines.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn task(&self, id: Uuid) -> Task {
        self.tasks().into_iter().find(|t| t.id == id).unwrap()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.state.lock().unwrap().posts.clone()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn find_all_enabled(&self) -> Result<Vec<Project>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .iter()
            .filter(|p| p.is_enabled)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_task_id(&self, task_id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let project = state
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .and_then(|t| state.pipelines.iter().find(|p| p.id == t.pipeline_id))
            .and_then(|pl| state.projects.iter().find(|p| p.id == pl.project_id))
            .cloned();
        Ok(project)
    }
}

#[async_trait]
impl PipelineRepository for InMemoryStore {
    async fn create(&self, project_id: Uuid, sequence: i64) -> Result<Pipeline, RepositoryError> {
        if self.failing_pipelines.lock().unwrap().contains(&project_id) {
            return Err(unavailable("pipelines"));
        }
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .pipelines
            .iter()
            .find(|p| p.project_id == project_id && p.sequence == sequence)
        {
            return Ok(existing.clone());
        }
        let now = Utc::now().into();
        let pipeline = Pipeline {
            id: Uuid::new_v4(),
            project_id,
            sequence,
            created_at: now,
            updated_at: now,
        };
        state.pipelines.push(pipeline.clone());
        Ok(pipeline)
    }

    async fn find_last(&self, project_id: Uuid) -> Result<Option<Pipeline>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .pipelines
            .iter()
            .filter(|p| p.project_id == project_id)
            .max_by_key(|p| p.sequence)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pipeline>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.pipelines.iter().find(|p| p.id == id).cloned())
    }

    async fn list_for_project(
        &self,
        project_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Pipeline>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut pipelines: Vec<Pipeline> = state
            .pipelines
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect();
        pipelines.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        pipelines.truncate(limit as usize);
        Ok(pipelines)
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn create(
        &self,
        pipeline_id: Uuid,
        task_type: TaskType,
    ) -> Result<Task, RepositoryError> {
        if self
            .failing_tasks
            .lock()
            .unwrap()
            .contains(&(pipeline_id, task_type))
        {
            return Err(unavailable("tasks"));
        }
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .tasks
            .iter()
            .find(|t| t.pipeline_id == pipeline_id && t.task_type == task_type)
        {
            return Ok(existing.clone());
        }
        let task = Task::new(pipeline_id, task_type);
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_by_type(
        &self,
        pipeline_id: Uuid,
        task_type: TaskType,
    ) -> Result<Option<Task>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .find(|t| t.pipeline_id == pipeline_id && t.task_type == task_type)
            .cloned())
    }

    async fn filter(
        &self,
        task_type: TaskType,
        status: TaskStatus,
    ) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.task_type == task_type && t.status == status)
            .cloned()
            .collect())
    }

    async fn update_status(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.status = task.status;
        stored.updated_at = Utc::now().into();
        Ok(())
    }

    async fn find_by_pipeline(&self, pipeline_id: Uuid) -> Result<Vec<Task>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.pipeline_id == pipeline_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create(
        &self,
        pipeline_id: Uuid,
        project_id: Uuid,
        title: &str,
        items: &[NewPostItem],
    ) -> Result<Post, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.posts.iter().find(|p| p.pipeline_id == pipeline_id) {
            return Ok(existing.clone());
        }
        let now = Utc::now().into();
        let post = Post {
            id: Uuid::new_v4(),
            pipeline_id,
            project_id,
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        for (position, item) in items.iter().enumerate() {
            state.items.push(PostItem {
                id: Uuid::new_v4(),
                post_id: post.id,
                position: position as i32,
                title: item.title.clone(),
                link: item.link.clone(),
                content: item.content.clone(),
                published_at: item.published_at.map(Into::into),
            });
        }
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_last_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Post>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .filter(|p| p.project_id == project_id)
            .last()
            .cloned())
    }

    async fn find_by_pipeline(&self, pipeline_id: Uuid) -> Result<Option<Post>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.pipeline_id == pipeline_id)
            .cloned())
    }

    async fn find_items(&self, post_id: Uuid) -> Result<Vec<PostItem>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .iter()
            .filter(|i| i.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn find_all(&self, project_id: Uuid) -> Result<Vec<Subscription>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .subscriptions
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.subscriptions.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, project_id: Uuid, email: &str) -> Result<Subscription, RepositoryError> {
        if let Some(existing) = self
            .state
            .lock()
            .unwrap()
            .subscriptions
            .iter()
            .find(|s| s.project_id == project_id && s.email == email)
        {
            return Ok(existing.clone());
        }
        Ok(self.add_subscription(project_id, email))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.subscriptions.len();
        state.subscriptions.retain(|s| s.id != id);
        if state.subscriptions.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl EmailTemplateRepository for InMemoryStore {
    async fn find_active(&self, project_id: Uuid) -> Result<Option<EmailTemplate>, RepositoryError> {
        if self.failing_templates.lock().unwrap().contains(&project_id) {
            return Err(unavailable("email templates"));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .templates
            .iter()
            .filter(|t| t.project_id == project_id && t.is_active)
            .max_by_key(|t| t.updated_at)
            .cloned())
    }
}

/// 返回预设条目的订阅源读取器
#[derive(Default)]
pub struct FakeFeedReader {
    items: Mutex<Vec<FeedItem>>,
    failing: Mutex<HashSet<String>>,
    delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<(String, DateTime<Utc>, bool)>>,
}

impl FakeFeedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_items(&self, items: Vec<FeedItem>) {
        *self.items.lock().unwrap() = items;
    }

    /// 让指定地址的读取返回请求错误
    pub fn fail_for(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<(String, DateTime<Utc>, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedReader for FakeFeedReader {
    async fn read_since(
        &self,
        url: &str,
        checkpoint: DateTime<Utc>,
        is_first_run: bool,
    ) -> Result<Vec<FeedItem>, FeedError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), checkpoint, is_first_run));
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.lock().unwrap().contains(url) {
            return Err(FeedError::Request("connection refused".to_string()));
        }
        Ok(self.items.lock().unwrap().clone())
    }
}

pub fn feed_item(title: &str, published_at: DateTime<Utc>) -> FeedItem {
    FeedItem {
        title: title.to_string(),
        description: format!("{} description", title),
        content: String::new(),
        link: format!("https://blog.example.com/{}", title.to_lowercase()),
        published_at: Some(published_at),
    }
}

/// 记录已发送邮件的传输，可指定失败的收件人
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Email>>,
    failing: Mutex<HashSet<String>>,
    cancel_on_send: Mutex<Option<CancellationToken>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, address: &str) {
        self.failing.lock().unwrap().insert(address.to_string());
    }

    /// 第一次成功发送后取消令牌，模拟投递途中的关闭
    pub fn cancel_after_send(&self, token: CancellationToken) {
        *self.cancel_on_send.lock().unwrap() = Some(token);
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        if self.failing.lock().unwrap().contains(&email.to.address) {
            return Err(EmailError::Rejected {
                status: 400,
                body: "invalid recipient".to_string(),
            });
        }
        self.sent.lock().unwrap().push(email.clone());
        if let Some(token) = self.cancel_on_send.lock().unwrap().as_ref() {
            token.cancel();
        }
        Ok(())
    }
}
