// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 文章实体
///
/// 每条流水线最多一篇文章，由完成的抓取任务生成，供发布任务读取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub pipeline_id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub created_at: DateTime<FixedOffset>,
    /// 下一次抓取的检查点
    pub updated_at: DateTime<FixedOffset>,
}

/// 文章条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostItem {
    pub id: Uuid,
    pub post_id: Uuid,
    /// 条目在文章中的位置，保持订阅源中的顺序
    pub position: i32,
    pub title: String,
    pub link: String,
    pub content: String,
    pub published_at: Option<DateTime<FixedOffset>>,
}

/// 待写入的文章条目
#[derive(Debug, Clone, PartialEq)]
pub struct NewPostItem {
    pub title: String,
    pub link: String,
    pub content: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// 根据项目名称生成文章标题
    pub fn title_for(project_name: &str) -> String {
        format!("The newsletter of {}", project_name)
    }
}
