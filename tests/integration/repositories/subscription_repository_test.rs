// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{seed_project, seed_subscription, setup_db};
use newsletter::domain::repositories::subscription_repository::SubscriptionRepository;
use newsletter::domain::repositories::task_repository::RepositoryError;
use newsletter::infrastructure::repositories::subscription_repo_impl::SubscriptionRepositoryImpl;

#[tokio::test]
async fn test_find_all_is_scoped_to_project() {
    let db = setup_db().await;
    let alpha = seed_project(&db, "alpha", true).await;
    let beta = seed_project(&db, "beta", true).await;
    seed_subscription(&db, alpha.id, "a@example.com").await;
    seed_subscription(&db, alpha.id, "b@example.com").await;
    seed_subscription(&db, beta.id, "c@example.com").await;
    let repo = SubscriptionRepositoryImpl::new(db.clone());

    let subscriptions = repo.find_all(alpha.id).await.unwrap();

    assert_eq!(subscriptions.len(), 2);
    assert!(subscriptions.iter().all(|s| s.project_id == alpha.id));
}

/// 测试删除订阅，重复删除返回NotFound
#[tokio::test]
async fn test_delete_removes_subscription_once() {
    let db = setup_db().await;
    let project = seed_project(&db, "alpha", true).await;
    let subscription = seed_subscription(&db, project.id, "a@example.com").await;
    let repo = SubscriptionRepositoryImpl::new(db.clone());

    repo.delete(subscription.id).await.unwrap();

    assert!(repo.find_by_id(subscription.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(subscription.id).await,
        Err(RepositoryError::NotFound)
    ));
}

/// 测试同一项目重复订阅返回同一条记录
#[tokio::test]
async fn test_create_is_idempotent_per_project() {
    let db = setup_db().await;
    let alpha = seed_project(&db, "alpha", true).await;
    let beta = seed_project(&db, "beta", true).await;
    let repo = SubscriptionRepositoryImpl::new(db.clone());

    let first = repo.create(alpha.id, "a@example.com").await.unwrap();
    let again = repo.create(alpha.id, "a@example.com").await.unwrap();
    let elsewhere = repo.create(beta.id, "a@example.com").await.unwrap();

    assert_eq!(first, again);
    assert_ne!(first.id, elsewhere.id);
    assert_eq!(repo.find_all(alpha.id).await.unwrap().len(), 1);
    assert_eq!(elsewhere.project_id, beta.id);
}
