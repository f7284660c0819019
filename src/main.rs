// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use newsletter::config::settings::Settings;
use newsletter::infrastructure::database::connection;
use newsletter::infrastructure::email::build_transport;
use newsletter::infrastructure::feed::http_feed_reader::HttpFeedReader;
use newsletter::infrastructure::metrics::init_metrics;
use newsletter::infrastructure::repositories::email_template_repo_impl::EmailTemplateRepositoryImpl;
use newsletter::infrastructure::repositories::pipeline_repo_impl::PipelineRepositoryImpl;
use newsletter::infrastructure::repositories::post_repo_impl::PostRepositoryImpl;
use newsletter::infrastructure::repositories::project_repo_impl::ProjectRepositoryImpl;
use newsletter::infrastructure::repositories::subscription_repo_impl::SubscriptionRepositoryImpl;
use newsletter::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use newsletter::infrastructure::template::minijinja_renderer::MiniJinjaRenderer;
use newsletter::infrastructure::token::HmacTokenEncoder;
use newsletter::presentation::routes;
use newsletter::presentation::state::AppState;
use newsletter::utils::clock::SystemClock;
use newsletter::utils::telemetry;
use newsletter::workers::manager::WorkerManager;
use newsletter::workers::pipeline_reconciler::PipelineReconciler;
use newsletter::workers::publish_worker::{PublishRepositories, PublishWorker};
use newsletter::workers::scrape_worker::ScrapeWorker;
use newsletter::workers::task_reconciler::TaskReconciler;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting newsletter...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize repositories and adapters
    let projects = Arc::new(ProjectRepositoryImpl::new(db.clone()));
    let pipelines = Arc::new(PipelineRepositoryImpl::new(db.clone()));
    let tasks = Arc::new(TaskRepositoryImpl::new(db.clone()));
    let posts = Arc::new(PostRepositoryImpl::new(db.clone()));
    let subscriptions = Arc::new(SubscriptionRepositoryImpl::new(db.clone()));
    let templates = Arc::new(EmailTemplateRepositoryImpl::new(db.clone()));

    let feed_reader = Arc::new(HttpFeedReader::new(&settings.feed)?);
    let transport = build_transport(&settings.email)?;
    let tokens = Arc::new(HmacTokenEncoder::new(
        settings.subscription.token_secret.clone(),
    ));

    if settings.subscription.token_secret == "CHANGEME" {
        warn!("subscription.token_secret is using the default value");
    }

    // 5. Start workers
    let shutdown = CancellationToken::new();
    let mut manager = WorkerManager::new(settings.scheduler.interval(), shutdown.clone());

    manager.spawn(Arc::new(PipelineReconciler::new(
        projects.clone(),
        pipelines.clone(),
        tasks.clone(),
    )));
    manager.spawn(Arc::new(TaskReconciler::new(
        projects.clone(),
        pipelines.clone(),
        tasks.clone(),
    )));
    manager.spawn(Arc::new(ScrapeWorker::new(
        tasks.clone(),
        projects.clone(),
        posts.clone(),
        feed_reader,
        Arc::new(SystemClock),
        settings.scheduler.feed_timeout(),
        settings.feed.min_scrape_interval(),
    )));
    manager.spawn(Arc::new(PublishWorker::new(
        PublishRepositories {
            tasks: tasks.clone(),
            projects: projects.clone(),
            posts,
            templates,
            subscriptions: subscriptions.clone(),
        },
        transport,
        Arc::new(MiniJinjaRenderer::new()),
        tokens.clone(),
        settings.publisher.clone(),
        settings.scheduler.send_timeout(),
    )));
    info!("Started {} workers", manager.len());

    // 6. Serve status and unsubscribe endpoints
    let app = routes::routes(AppState {
        projects,
        pipelines,
        tasks,
        subscriptions,
        tokens,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    let server_shutdown = shutdown.clone();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(server_shutdown.cancelled_owned())
            .await
    });

    manager.wait_for_shutdown().await;

    server.await??;
    info!("Newsletter stopped");

    Ok(())
}
