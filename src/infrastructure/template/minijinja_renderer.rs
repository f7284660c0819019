// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::email_template::EmailTemplate;
use crate::domain::services::template_renderer::{
    RenderedEmail, TemplateData, TemplateError, TemplateRenderer,
};
use minijinja::{Environment, ErrorKind};

// The file extension drives minijinja's auto-escape callback.
const SUBJECT_NAME: &str = "subject.txt";
const BODY_NAME: &str = "body.html";
const TEXT_NAME: &str = "body.txt";

const TEXT_TEMPLATE: &str = "{{ title }}

{% for item in items %}{{ item.title }}
{{ item.link }}

{% endfor %}Unsubscribe: {{ unsubscribe_link }}";

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        match err.kind() {
            ErrorKind::SyntaxError => TemplateError::Syntax(err.to_string()),
            _ => TemplateError::Render(err.to_string()),
        }
    }
}

/// 基于minijinja的邮件模板渲染器
///
/// 模板可使用的变量：
///
/// - `title`: 文章标题
/// - `unsubscribe_link`: 当前订阅者的退订链接
/// - `items`: 文章条目列表，每项包含 `title`、`link`、`content`
///
/// 主题不做转义；正文按HTML自动转义，条目内容需要原样输出时使用 `| safe`。
/// 纯文本正文由内置模板生成，列出标题、条目链接和退订链接。
#[derive(Debug, Clone, Default)]
pub struct MiniJinjaRenderer;

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(
        &self,
        template: &EmailTemplate,
        data: &TemplateData,
    ) -> Result<RenderedEmail, TemplateError> {
        let env = Environment::new();
        let subject = env.render_named_str(SUBJECT_NAME, &template.subject, data)?;
        let body = env.render_named_str(BODY_NAME, &template.content, data)?;
        let text = env.render_named_str(TEXT_NAME, TEXT_TEMPLATE, data)?;

        Ok(RenderedEmail {
            subject,
            body,
            text,
        })
    }
}
