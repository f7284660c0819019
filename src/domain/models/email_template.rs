// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 邮件模板实体
///
/// `subject` 与 `content` 都是模板字符串，渲染时可用的变量见
/// [`crate::domain::services::template_renderer::TemplateData`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    /// 项目当前使用的模板
    pub is_active: bool,
    pub subject: String,
    pub content: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}
