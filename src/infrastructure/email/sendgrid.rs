// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::email_transport::{Email, EmailError, EmailTransport, Mailbox};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

impl<'a> From<&'a Mailbox> for Address<'a> {
    fn from(mailbox: &'a Mailbox) -> Self {
        Self {
            email: &mailbox.address,
            name: &mailbox.name,
        }
    }
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

impl<'a> From<&'a Email> for SendRequest<'a> {
    fn from(email: &'a Email) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address::from(&email.to)],
            }],
            from: Address::from(&email.from),
            subject: &email.subject,
            content: contents(email),
        }
    }
}

// SendGrid requires text/plain to precede text/html.
fn contents(email: &Email) -> Vec<Content<'_>> {
    let mut contents = Vec::with_capacity(2);
    if !email.text.is_empty() {
        contents.push(Content {
            content_type: "text/plain",
            value: &email.text,
        });
    }
    contents.push(Content {
        content_type: "text/html",
        value: &email.body,
    });
    contents
}

/// SendGrid v3 邮件传输
///
/// 以纯文本与HTML内容调用 `POST {base_url}/v3/mail/send`。
#[derive(Clone)]
pub struct SendGridTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SendGridTransport {
    pub fn new(base_url: String, api_key: String) -> Result<Self, EmailError> {
        let client = Client::builder()
            .build()
            .map_err(|e| EmailError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl EmailTransport for SendGridTransport {
    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&SendRequest::from(email))
            .send()
            .await
            .map_err(|e| EmailError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            target_address = %email.to.address,
            status_code = status.as_u16(),
            "SendGrid email successfully sent"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "sendgrid_test.rs"]
mod tests;
