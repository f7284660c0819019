// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::pipeline_repository::PipelineRepository;
use crate::domain::repositories::project_repository::ProjectRepository;
use crate::domain::repositories::subscription_repository::SubscriptionRepository;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::token_encoder::TokenEncoder;
use std::sync::Arc;

/// HTTP处理器共享的依赖
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ProjectRepository>,
    pub pipelines: Arc<dyn PipelineRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub tokens: Arc<dyn TokenEncoder>,
}
