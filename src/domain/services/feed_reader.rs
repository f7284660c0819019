// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::models::post::NewPostItem;

/// 订阅源读取错误
///
/// 所有变体都被视为暂时性错误：任务保持Ready，下一个周期重试。
#[derive(Error, Debug)]
pub enum FeedError {
    /// 网络请求失败
    #[error("Feed request failed: {0}")]
    Request(String),
    /// 订阅源内容无法解析
    #[error("Feed parse failed: {0}")]
    Parse(String),
    /// 读取超时
    #[error("Feed read timed out")]
    Timeout,
}

/// 订阅源条目
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub content: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl FeedItem {
    /// 条目正文；没有正文时使用摘要
    pub fn body(&self) -> &str {
        if self.content.is_empty() {
            &self.description
        } else {
            &self.content
        }
    }
}

impl From<&FeedItem> for NewPostItem {
    fn from(item: &FeedItem) -> Self {
        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            content: item.body().to_string(),
            published_at: item.published_at,
        }
    }
}

/// 订阅源读取器特质
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// 读取检查点之后（严格晚于）发布的条目
    ///
    /// # 参数
    ///
    /// * `url` - 订阅源地址
    /// * `checkpoint` - 检查点时间
    /// * `is_first_run` - 项目是否还没有任何文章
    async fn read_since(
        &self,
        url: &str,
        checkpoint: DateTime<Utc>,
        is_first_run: bool,
    ) -> Result<Vec<FeedItem>, FeedError>;
}
