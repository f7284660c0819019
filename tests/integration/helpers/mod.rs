// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use newsletter::config::settings::DatabaseSettings;
use newsletter::domain::models::project::Project;
use newsletter::domain::models::subscription::Subscription;
use newsletter::infrastructure::database::connection;
use newsletter::infrastructure::database::entities::{email_template, project, subscription};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

/// 创建已执行迁移的内存数据库
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: None,
        min_connections: None,
        connect_timeout: None,
        idle_timeout: None,
    };
    let db = connection::create_pool(&settings)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    Arc::new(db)
}

pub async fn seed_project(db: &DatabaseConnection, name: &str, enabled: bool) -> Project {
    let now = Utc::now().into();
    let model = project::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        feed_url: Set(format!("https://{}.example.com/feed.xml", name)),
        is_enabled: Set(enabled),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to seed project");

    Project {
        id: model.id,
        name: model.name,
        feed_url: model.feed_url,
        is_enabled: model.is_enabled,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub async fn seed_subscription(
    db: &DatabaseConnection,
    project_id: Uuid,
    email: &str,
) -> Subscription {
    let model = subscription::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        email: Set(email.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to seed subscription");

    Subscription {
        id: model.id,
        project_id: model.project_id,
        email: model.email,
        created_at: model.created_at,
    }
}

pub async fn seed_template(
    db: &DatabaseConnection,
    project_id: Uuid,
    name: &str,
    is_active: bool,
    subject: &str,
    content: &str,
) -> Uuid {
    let now = Utc::now().into();
    let model = email_template::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        name: Set(name.to_string()),
        is_active: Set(is_active),
        subject: Set(subject.to_string()),
        content: Set(content.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to seed email template");

    model.id
}
