// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 在给定地址启动 Prometheus 导出器并注册指标描述；
/// 地址无效或端口占用时仅记录警告
pub fn init_metrics(listen_addr: &str) {
    let addr: SocketAddr = match listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", listen_addr, e);
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

fn describe_metrics() {
    describe_counter!("jobs_created_total", "Total number of jobs submitted");
    describe_counter!("jobs_completed_total", "Total number of jobs completed");
    describe_counter!("jobs_failed_total", "Total number of jobs failed");
    describe_histogram!("job_duration_seconds", "Duration of job execution in seconds");
    describe_counter!("pages_fetched_total", "Total number of pages fetched");
    describe_counter!("calls_placed_total", "Calls handed to a voice provider");
    describe_counter!("calls_blocked_total", "Calls rejected by compliance checks");
    describe_counter!("calls_failed_total", "Calls the voice provider could not place");
    describe_counter!(
        "webhook_delivery_attempts_total",
        "Total number of webhook delivery attempts"
    );
    describe_counter!(
        "webhook_delivery_success_total",
        "Total number of successful webhook deliveries"
    );
    describe_counter!(
        "webhook_delivery_failed_total",
        "Total number of failed webhook deliveries"
    );
    describe_counter!("webhook_dead_letter_total", "Webhook events given up on");
    describe_histogram!(
        "webhook_delivery_duration_seconds",
        "Duration of webhook deliveries in seconds"
    );
    describe_counter!("http_requests_throttled_total", "Requests rejected by the rate limiter");
}
