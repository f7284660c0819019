// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 项目实体
///
/// 由管理员维护，核心逻辑只读。每个启用的项目都会持续拥有一条活跃流水线。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// 项目唯一标识符
    pub id: Uuid,
    /// 项目名称，用于生成文章标题
    pub name: String,
    /// 订阅源地址
    pub feed_url: String,
    /// 是否启用
    pub is_enabled: bool,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间，在项目还没有任何文章时作为抓取检查点
    pub updated_at: DateTime<FixedOffset>,
}
