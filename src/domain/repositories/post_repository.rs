// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::task_repository::RepositoryError;
use crate::domain::models::post::{NewPostItem, Post, PostItem};
use async_trait::async_trait;
use uuid::Uuid;

/// 文章仓库特质
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 在一个事务中创建文章及其条目
    ///
    /// 每条流水线只有一篇文章：若已存在则直接返回已有文章，不写入条目。
    async fn create(
        &self,
        pipeline_id: Uuid,
        project_id: Uuid,
        title: &str,
        items: &[NewPostItem],
    ) -> Result<Post, RepositoryError>;
    /// 获取项目最近的一篇文章
    async fn find_last_for_project(&self, project_id: Uuid)
        -> Result<Option<Post>, RepositoryError>;
    /// 获取流水线的文章
    async fn find_by_pipeline(&self, pipeline_id: Uuid) -> Result<Option<Post>, RepositoryError>;
    /// 按位置顺序获取文章条目
    async fn find_items(&self, post_id: Uuid) -> Result<Vec<PostItem>, RepositoryError>;
}
