// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use crate::domain::models::task::{TaskStatus, TaskType};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 启用时安装Prometheus导出器并注册各项指标说明。
/// 未启用时不安装记录器，指标宏调用为空操作。
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics listen address {}: {}",
                settings.listen_addr, e
            );
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!("pipelines_created_total", "Total number of pipelines created");
    describe_counter!("tasks_created_total", "Total number of tasks created");
    describe_counter!(
        "task_transitions_total",
        "Total number of task status transitions"
    );
    describe_counter!(
        "feed_items_scraped_total",
        "Total number of feed items stored into posts"
    );
    describe_counter!(
        "feed_fetch_failures_total",
        "Total number of failed feed fetches"
    );
    describe_counter!("emails_sent_total", "Total number of emails delivered");
    describe_counter!("emails_failed_total", "Total number of failed email sends");
    describe_histogram!(
        "publish_task_duration_seconds",
        "Duration of publish task executions in seconds"
    );

    info!("Metrics exporter listening on {}", addr);
}

pub fn record_pipeline_created() {
    counter!("pipelines_created_total").increment(1);
}

pub fn record_task_created(task_type: TaskType) {
    counter!("tasks_created_total", "task_type" => task_type.to_string()).increment(1);
}

pub fn record_task_transition(task_type: TaskType, status: TaskStatus) {
    counter!(
        "task_transitions_total",
        "task_type" => task_type.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_feed_items(count: usize) {
    counter!("feed_items_scraped_total").increment(count as u64);
}

pub fn record_feed_failure() {
    counter!("feed_fetch_failures_total").increment(1);
}

pub fn record_email(delivered: bool) {
    if delivered {
        counter!("emails_sent_total").increment(1);
    } else {
        counter!("emails_failed_total").increment(1);
    }
}

pub fn record_publish_duration(elapsed: Duration) {
    histogram!("publish_task_duration_seconds").record(elapsed.as_secs_f64());
}
