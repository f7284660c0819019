// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::subscription::Subscription;
use async_trait::async_trait;
use uuid::Uuid;

/// 订阅仓库特质
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// 获取项目的全部订阅
    async fn find_all(&self, project_id: Uuid) -> Result<Vec<Subscription>, RepositoryError>;
    /// 根据ID查找订阅
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError>;
    /// 创建订阅，同一项目下相同邮箱已存在时返回已有订阅
    async fn create(&self, project_id: Uuid, email: &str) -> Result<Subscription, RepositoryError>;
    /// 删除订阅（退订）
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
