// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::subscription::Subscription;
use crate::domain::repositories::subscription_repository::SubscriptionRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::subscription as subscription_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

/// 订阅仓库实现
#[derive(Clone)]
pub struct SubscriptionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SubscriptionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<subscription_entity::Model> for Subscription {
    fn from(model: subscription_entity::Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryImpl {
    async fn find_all(&self, project_id: Uuid) -> Result<Vec<Subscription>, RepositoryError> {
        let models = subscription_entity::Entity::find()
            .filter(subscription_entity::Column::ProjectId.eq(project_id))
            .order_by_asc(subscription_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError> {
        let model = subscription_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn create(&self, project_id: Uuid, email: &str) -> Result<Subscription, RepositoryError> {
        let model = subscription_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            email: Set(email.to_string()),
            created_at: Set(Utc::now().into()),
        };

        let inserted = subscription_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    subscription_entity::Column::ProjectId,
                    subscription_entity::Column::Email,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec(self.db.as_ref())
            .await;

        match inserted {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }

        let model = subscription_entity::Entity::find()
            .filter(subscription_entity::Column::ProjectId.eq(project_id))
            .filter(subscription_entity::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = subscription_entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
