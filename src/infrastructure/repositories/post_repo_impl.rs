// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::post::{NewPostItem, Post, PostItem};
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::{post as post_entity, post_item as item_entity};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

/// 文章仓库实现
///
/// 文章与其条目在同一个事务内写入；每个流水线至多一篇文章。
#[derive(Clone)]
pub struct PostRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<post_entity::Model> for Post {
    fn from(model: post_entity::Model) -> Self {
        Self {
            id: model.id,
            pipeline_id: model.pipeline_id,
            project_id: model.project_id,
            title: model.title,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<item_entity::Model> for PostItem {
    fn from(model: item_entity::Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            position: model.position,
            title: model.title,
            link: model.link,
            content: model.content,
            published_at: model.published_at,
        }
    }
}

#[async_trait]
impl PostRepository for PostRepositoryImpl {
    async fn create(
        &self,
        pipeline_id: Uuid,
        project_id: Uuid,
        title: &str,
        items: &[NewPostItem],
    ) -> Result<Post, RepositoryError> {
        let txn = self.db.begin().await?;

        let existing = post_entity::Entity::find()
            .filter(post_entity::Column::PipelineId.eq(pipeline_id))
            .one(&txn)
            .await?;

        if let Some(existing) = existing {
            txn.commit().await?;
            return Ok(existing.into());
        }

        let now = Utc::now();
        let post = post_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            pipeline_id: Set(pipeline_id),
            project_id: Set(project_id),
            title: Set(title.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        for (position, item) in items.iter().enumerate() {
            item_entity::ActiveModel {
                id: Set(Uuid::new_v4()),
                post_id: Set(post.id),
                position: Set(position as i32),
                title: Set(item.title.clone()),
                link: Set(item.link.clone()),
                content: Set(item.content.clone()),
                published_at: Set(item.published_at.map(Into::into)),
                created_at: Set(now.into()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(post.into())
    }

    async fn find_last_for_project(
        &self,
        project_id: Uuid,
    ) -> Result<Option<Post>, RepositoryError> {
        let model = post_entity::Entity::find()
            .filter(post_entity::Column::ProjectId.eq(project_id))
            .order_by_desc(post_entity::Column::CreatedAt)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_pipeline(&self, pipeline_id: Uuid) -> Result<Option<Post>, RepositoryError> {
        let model = post_entity::Entity::find()
            .filter(post_entity::Column::PipelineId.eq(pipeline_id))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_items(&self, post_id: Uuid) -> Result<Vec<PostItem>, RepositoryError> {
        let models = item_entity::Entity::find()
            .filter(item_entity::Column::PostId.eq(post_id))
            .order_by_asc(item_entity::Column::Position)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
