//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::OnceLock;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::ObservabilityConfig;

/// 全局 Prometheus handle，用于渲染指标
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROMETHEUS_HANDLE.set(handle.clone());

    register_common_metrics(&config.service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册业务指标描述
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "carbon_logs_created_total",
        "Total number of carbon log entries created"
    );
    metrics::describe_gauge!(
        "carbon_emissions_kg_total",
        "Sum of logged emissions in kg CO2e"
    );
    metrics::describe_counter!("points_awarded_total", "Total gamification points awarded");
    metrics::describe_counter!("cfc_reports_total", "Total number of CFC reports submitted");
    metrics::describe_counter!(
        "verification_emails_total",
        "Verification email delivery attempts by outcome"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

/// 获取全局 Prometheus handle（用于自定义渲染）
pub fn get_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

// ============================================================================
// 指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录一条新的碳排放记录
#[inline]
pub fn record_carbon_log(category: &str, carbon_kg: f64) {
    metrics::counter!("carbon_logs_created_total", "category" => category.to_string())
        .increment(1);

    // counter 只接受整数，小数累计用只增不减的 gauge
    metrics::gauge!("carbon_emissions_kg_total", "category" => category.to_string())
        .increment(carbon_kg.max(0.0));
}

/// 记录发放的积分
#[inline]
pub fn record_points_awarded(points: i32) {
    if points > 0 {
        metrics::counter!("points_awarded_total").increment(points as u64);
    }
}

/// 记录 CFC 报告
#[inline]
pub fn record_cfc_report(device: &str) {
    metrics::counter!("cfc_reports_total", "device" => device.to_string()).increment(1);
}

/// 记录验证邮件发送结果（resend / smtp / not_sent / failed）
#[inline]
pub fn record_verification_email(outcome: &str) {
    metrics::counter!("verification_emails_total", "outcome" => outcome.to_string())
        .increment(1);
}
