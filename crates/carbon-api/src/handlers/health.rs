//! 健康检查处理器

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

const SERVICE_NAME: &str = "carbon-tracker-api";

/// 存活检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: String,
    pub service: &'static str,
    pub version: &'static str,
}

/// 就绪检查响应
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub checks: ReadyChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyChecks {
    pub database: bool,
}

/// 数据库错误只截取前 50 个字符
fn database_status(result: crate::error::Result<()>) -> String {
    match result {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            let detail: String = e.to_string().chars().take(50).collect();
            format!("error: {}", detail)
        }
    }
}

/// GET /health
///
/// 进程存活即返回 200，数据库状态仅作信息展示
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        database: database_status(state.repos.stats.ping().await),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /ready
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let database = state.repos.stats.ping().await.is_ok();

    let (code, status) = if database {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(ReadyResponse {
            status,
            checks: ReadyChecks { database },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_database_status_truncates_error() {
        assert_eq!(database_status(Ok(())), "connected");

        let long = "x".repeat(120);
        let status = database_status(Err(ApiError::Internal(long)));
        assert!(status.starts_with("error: "));
        assert!(status.len() <= "error: ".len() + 50);
    }
}
