// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{seed_project, seed_subscription, setup_db};
use axum::http::StatusCode;
use axum_test::TestServer;
use newsletter::domain::models::subscription::Subscription;
use newsletter::domain::models::task::TaskType;
use newsletter::domain::repositories::pipeline_repository::PipelineRepository;
use newsletter::domain::repositories::subscription_repository::SubscriptionRepository;
use newsletter::domain::repositories::task_repository::TaskRepository;
use newsletter::domain::services::token_encoder::TokenEncoder;
use newsletter::infrastructure::repositories::pipeline_repo_impl::PipelineRepositoryImpl;
use newsletter::infrastructure::repositories::project_repo_impl::ProjectRepositoryImpl;
use newsletter::infrastructure::repositories::subscription_repo_impl::SubscriptionRepositoryImpl;
use newsletter::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use newsletter::infrastructure::token::HmacTokenEncoder;
use newsletter::presentation::routes;
use newsletter::presentation::state::AppState;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const SECRET: &str = "route-test-secret";

struct TestApp {
    server: TestServer,
    db: Arc<DatabaseConnection>,
}

async fn create_test_app() -> TestApp {
    let db = setup_db().await;
    let state = AppState {
        projects: Arc::new(ProjectRepositoryImpl::new(db.clone())),
        pipelines: Arc::new(PipelineRepositoryImpl::new(db.clone())),
        tasks: Arc::new(TaskRepositoryImpl::new(db.clone())),
        subscriptions: Arc::new(SubscriptionRepositoryImpl::new(db.clone())),
        tokens: Arc::new(HmacTokenEncoder::new(SECRET)),
    };
    let server = TestServer::new(routes::routes(state)).unwrap();
    TestApp { server, db }
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_version() {
    let app = create_test_app().await;

    let response = app.server.get("/v1/version").await;

    response.assert_status_ok();
    response.assert_text(env!("CARGO_PKG_VERSION"));
}

/// 测试未知项目的流水线查询返回404
#[tokio::test]
async fn test_pipelines_of_unknown_project_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/v1/projects/{}/pipelines", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

/// 测试流水线状态查询
///
/// 验证流水线按序号倒序返回，并附带各任务状态
#[tokio::test]
async fn test_pipelines_list_with_task_status() {
    let app = create_test_app().await;
    let project = seed_project(&app.db, "alpha", true).await;
    let pipelines = PipelineRepositoryImpl::new(app.db.clone());
    let tasks = TaskRepositoryImpl::new(app.db.clone());
    let first = pipelines.create(project.id, 1).await.unwrap();
    for task_type in TaskType::ALL {
        let task = tasks.create(first.id, task_type).await.unwrap();
        let task = task.promote().unwrap().finish().unwrap();
        tasks.update_status(&task).await.unwrap();
    }
    let second = pipelines.create(project.id, 2).await.unwrap();
    tasks.create(second.id, TaskType::Scrape).await.unwrap();

    let response = app
        .server
        .get(&format!("/v1/projects/{}/pipelines", project.id))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["project_id"], project.id.to_string());
    let listed = body["pipelines"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["sequence"], 2);
    assert_eq!(listed[0]["finished"], false);
    assert_eq!(listed[0]["tasks"][0]["status"], "Waiting");
    assert_eq!(listed[1]["sequence"], 1);
    assert_eq!(listed[1]["finished"], true);
    assert_eq!(listed[1]["tasks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_pipelines_limit_query() {
    let app = create_test_app().await;
    let project = seed_project(&app.db, "alpha", true).await;
    let pipelines = PipelineRepositoryImpl::new(app.db.clone());
    for sequence in 1..=3 {
        pipelines.create(project.id, sequence).await.unwrap();
    }

    let response = app
        .server
        .get(&format!("/v1/projects/{}/pipelines", project.id))
        .add_query_param("limit", 1)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pipelines"].as_array().unwrap().len(), 1);
    assert_eq!(body["pipelines"][0]["sequence"], 3);
}

async fn subscribed(app: &TestApp) -> Subscription {
    let project = seed_project(&app.db, "alpha", true).await;
    seed_subscription(&app.db, project.id, "reader@example.com").await
}

/// 测试使用有效令牌退订
#[tokio::test]
async fn test_unsubscribe_with_valid_token() {
    let app = create_test_app().await;
    let subscription = subscribed(&app).await;
    let token = HmacTokenEncoder::new(SECRET).encode(&subscription).unwrap();

    let response = app
        .server
        .get("/unsubscribe")
        .add_query_param("token", &token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "unsubscribed");
    let repo = SubscriptionRepositoryImpl::new(app.db.clone());
    assert!(repo.find_by_id(subscription.id).await.unwrap().is_none());

    let again = app
        .server
        .get("/unsubscribe")
        .add_query_param("token", &token)
        .await;
    again.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsubscribe_with_foreign_signature_is_rejected() {
    let app = create_test_app().await;
    let subscription = subscribed(&app).await;
    let token = HmacTokenEncoder::new("another-secret")
        .encode(&subscription)
        .unwrap();

    let response = app
        .server
        .get("/unsubscribe")
        .add_query_param("token", &token)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let repo = SubscriptionRepositoryImpl::new(app.db.clone());
    assert!(repo.find_by_id(subscription.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_unsubscribe_with_malformed_token_is_rejected() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/unsubscribe")
        .add_query_param("token", "not-a-token")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

/// 测试令牌中的邮箱与订阅不一致时拒绝退订
#[tokio::test]
async fn test_unsubscribe_with_mismatched_email_is_rejected() {
    let app = create_test_app().await;
    let mut subscription = subscribed(&app).await;
    let stored_id = subscription.id;
    subscription.email = "someone-else@example.com".to_string();
    let token = HmacTokenEncoder::new(SECRET).encode(&subscription).unwrap();

    let response = app
        .server
        .get("/unsubscribe")
        .add_query_param("token", &token)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let repo = SubscriptionRepositoryImpl::new(app.db.clone());
    assert!(repo.find_by_id(stored_id).await.unwrap().is_some());
}

/// 测试订阅创建返回201，重复订阅返回同一条记录
#[tokio::test]
async fn test_subscribe_creates_subscription_once() {
    let app = create_test_app().await;
    let project = seed_project(&app.db, "alpha", true).await;
    let path = format!("/v1/projects/{}/subscriptions", project.id);

    let response = app
        .server
        .post(&path)
        .json(&serde_json::json!({ "email": " reader@example.com " }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Subscription = response.json();
    assert_eq!(created.project_id, project.id);
    assert_eq!(created.email, "reader@example.com");

    let again: Subscription = app
        .server
        .post(&path)
        .json(&serde_json::json!({ "email": "reader@example.com" }))
        .await
        .json();
    assert_eq!(again.id, created.id);

    let stored = SubscriptionRepositoryImpl::new(app.db.clone())
        .find_all(project.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_subscribe_to_unknown_project_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .post(&format!("/v1/projects/{}/subscriptions", Uuid::new_v4()))
        .json(&serde_json::json!({ "email": "reader@example.com" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscribe_with_invalid_email_is_bad_request() {
    let app = create_test_app().await;
    let project = seed_project(&app.db, "alpha", true).await;

    let response = app
        .server
        .post(&format!("/v1/projects/{}/subscriptions", project.id))
        .json(&serde_json::json!({ "email": "not-an-address" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Invalid email"));
    assert!(SubscriptionRepositoryImpl::new(app.db.clone())
        .find_all(project.id)
        .await
        .unwrap()
        .is_empty());
}
