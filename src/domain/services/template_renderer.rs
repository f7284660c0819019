// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use thiserror::Error;

use crate::domain::models::email_template::EmailTemplate;
use crate::domain::models::post::PostItem;

/// 模板渲染错误
#[derive(Error, Debug)]
pub enum TemplateError {
    /// 模板语法错误
    #[error("Template syntax error: {0}")]
    Syntax(String),
    /// 渲染失败
    #[error("Template render error: {0}")]
    Render(String),
}

/// 模板中的单个条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateItem {
    pub title: String,
    pub link: String,
    pub content: String,
}

impl From<&PostItem> for TemplateItem {
    fn from(item: &PostItem) -> Self {
        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            content: item.content.clone(),
        }
    }
}

/// 渲染模板时可用的数据
///
/// 模板中可使用 `title`、`unsubscribe_link` 和 `items`（每项包含
/// `title`、`link`、`content`）。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateData {
    pub title: String,
    pub unsubscribe_link: String,
    pub items: Vec<TemplateItem>,
}

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    /// HTML正文
    pub body: String,
    /// 纯文本正文
    pub text: String,
}

/// 模板渲染器特质
pub trait TemplateRenderer: Send + Sync {
    /// 渲染邮件主题与正文
    fn render(
        &self,
        template: &EmailTemplate,
        data: &TemplateData,
    ) -> Result<RenderedEmail, TemplateError>;
}
