// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::services::token_encoder::TokenError;
use crate::domain::models::subscription::Subscription;
use crate::presentation::errors::{AppError, RequestError};
use crate::presentation::state::AppState;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// 为项目添加订阅者
///
/// 项目不存在返回404，邮箱格式不合法返回400。
/// 重复订阅返回已有记录。
pub async fn subscribe(
    Extension(state): Extension<AppState>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Subscription>), AppError> {
    let email = normalize_email(&request.email)?;

    state
        .projects
        .find_by_id(project_id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    let subscription = state.subscriptions.create(project_id, &email).await?;

    info!(
        subscription_id = %subscription.id,
        %project_id,
        "Subscription added"
    );

    Ok((StatusCode::CREATED, Json(subscription)))
}

fn normalize_email(raw: &str) -> Result<String, RequestError> {
    let email = raw.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
        && !email.chars().any(char::is_whitespace);
    if !valid {
        return Err(RequestError::InvalidEmail(raw.to_string()));
    }
    Ok(email.to_string())
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeQuery {
    pub token: String,
}

/// 通过邮件中的退订链接删除订阅
///
/// 令牌无效返回400，订阅不存在返回404。
pub async fn unsubscribe(
    Extension(state): Extension<AppState>,
    Query(query): Query<UnsubscribeQuery>,
) -> Result<Json<Value>, AppError> {
    let claims = state.tokens.decode(&query.token)?;

    let subscription = state
        .subscriptions
        .find_by_id(claims.subscription_id)
        .await?
        .ok_or(RepositoryError::NotFound)?;

    if subscription.email != claims.email {
        return Err(TokenError::InvalidSignature.into());
    }

    state.subscriptions.delete(subscription.id).await?;

    info!(
        subscription_id = %subscription.id,
        project_id = %subscription.project_id,
        "Subscription removed"
    );

    Ok(Json(json!({ "status": "unsubscribed" })))
}
