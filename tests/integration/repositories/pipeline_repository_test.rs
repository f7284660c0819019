// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{seed_project, setup_db};
use newsletter::domain::repositories::pipeline_repository::PipelineRepository;
use newsletter::infrastructure::repositories::pipeline_repo_impl::PipelineRepositoryImpl;

/// 测试同一序号只创建一条流水线
#[tokio::test]
async fn test_sequence_is_unique_per_project() {
    let db = setup_db().await;
    let project = seed_project(&db, "alpha", true).await;
    let repo = PipelineRepositoryImpl::new(db.clone());

    let first = repo.create(project.id, 1).await.unwrap();
    let again = repo.create(project.id, 1).await.unwrap();

    assert_eq!(first.id, again.id);
    assert_eq!(repo.list_for_project(project.id, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_last_returns_highest_sequence() {
    let db = setup_db().await;
    let alpha = seed_project(&db, "alpha", true).await;
    let beta = seed_project(&db, "beta", true).await;
    let repo = PipelineRepositoryImpl::new(db.clone());

    assert!(repo.find_last(alpha.id).await.unwrap().is_none());

    repo.create(alpha.id, 1).await.unwrap();
    let latest = repo.create(alpha.id, 2).await.unwrap();
    repo.create(beta.id, 5).await.unwrap();

    let last = repo.find_last(alpha.id).await.unwrap().unwrap();
    assert_eq!(last.id, latest.id);
    assert_eq!(last.sequence, 2);
}

#[tokio::test]
async fn test_list_for_project_is_newest_first_and_limited() {
    let db = setup_db().await;
    let project = seed_project(&db, "alpha", true).await;
    let repo = PipelineRepositoryImpl::new(db.clone());
    for sequence in 1..=4 {
        repo.create(project.id, sequence).await.unwrap();
    }

    let listed = repo.list_for_project(project.id, 2).await.unwrap();

    let sequences: Vec<i64> = listed.iter().map(|p| p.sequence).collect();
    assert_eq!(sequences, vec![4, 3]);
}
