// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::FeedSettings;
use crate::domain::services::feed_reader::{FeedError, FeedItem, FeedReader};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Feed};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// 基于HTTP的订阅源读取器
///
/// 支持RSS与Atom格式。超时与取消由调用方控制。
#[derive(Clone)]
pub struct HttpFeedReader {
    client: Client,
    allow_previous_publications: bool,
}

impl HttpFeedReader {
    /// 创建新的订阅源读取器
    ///
    /// # 参数
    ///
    /// * `settings` - 订阅源配置
    pub fn new(settings: &FeedSettings) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| FeedError::Request(e.to_string()))?;

        Ok(Self {
            client,
            allow_previous_publications: settings.allow_previous_publications,
        })
    }

    async fn fetch(&self, url: &str) -> Result<Feed, FeedError> {
        let url = parse_feed_url(url)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| FeedError::Request(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Request(e.to_string()))?;

        feed_rs::parser::parse(body.as_ref()).map_err(|e| FeedError::Parse(e.to_string()))
    }
}

fn to_feed_item(entry: &Entry, published_at: DateTime<Utc>) -> FeedItem {
    FeedItem {
        title: entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        description: entry
            .summary
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        content: entry
            .content
            .as_ref()
            .and_then(|c| c.body.clone())
            .unwrap_or_default(),
        link: entry
            .links
            .first()
            .map(|l| l.href.clone())
            .unwrap_or_default(),
        published_at: Some(published_at),
    }
}

/// 从解析后的订阅源中挑选新条目
///
/// 条目日期取发布时间，缺失时取更新时间；两者都缺失的条目被跳过。
/// `include_all` 为真时忽略检查点，返回所有带日期的条目。
pub(crate) fn select_items(
    feed: &Feed,
    checkpoint: DateTime<Utc>,
    include_all: bool,
) -> Vec<FeedItem> {
    feed.entries
        .iter()
        .filter_map(|entry| {
            let date = entry.published.or(entry.updated)?;
            if include_all || date > checkpoint {
                Some(to_feed_item(entry, date))
            } else {
                None
            }
        })
        .collect()
}

/// 仅接受 http 与 https 地址
fn parse_feed_url(raw: &str) -> Result<Url, FeedError> {
    let url = Url::parse(raw).map_err(|e| FeedError::Request(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FeedError::Request(format!(
            "Unsupported feed scheme: {}",
            scheme
        ))),
    }
}

#[async_trait]
impl FeedReader for HttpFeedReader {
    async fn read_since(
        &self,
        url: &str,
        checkpoint: DateTime<Utc>,
        is_first_run: bool,
    ) -> Result<Vec<FeedItem>, FeedError> {
        let feed = self.fetch(url).await?;
        let include_all = self.allow_previous_publications && is_first_run;
        let items = select_items(&feed, checkpoint, include_all);

        debug!(
            url,
            entries = feed.entries.len(),
            selected = items.len(),
            %checkpoint,
            "Feed read"
        );

        Ok(items)
    }
}

#[cfg(test)]
#[path = "http_feed_reader_test.rs"]
mod tests;
