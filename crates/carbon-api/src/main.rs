//! 个人碳足迹追踪 API 服务
//!
//! 提供碳排放记录、建议、游戏化与回收点查询等 REST API。

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use carbon_api::{auth::JwtConfig, email::EmailService, routes, state::AppState};
use carbon_shared::{
    config::AppConfig,
    database::Database,
    observability::{self, middleware as obs_middleware},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 从 config/ 与 CARBON_ 前缀环境变量加载配置
    let config = AppConfig::load("carbon-api")?;

    let obs_config = config
        .observability
        .clone()
        .with_service_name(&config.service_name);
    let _guard = observability::init(&obs_config).await?;

    info!(
        environment = %config.environment,
        "Starting carbon-api on {}",
        config.server_addr()
    );

    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.run_migrations(&MIGRATOR).await?;
    }

    // 生产环境必须显式配置 JWT 密钥
    let (jwt_secret, explicit) = config.jwt_secret()?;
    if !explicit {
        warn!("Using development JWT secret - set CARBON_AUTH__JWT_SECRET for production");
    }
    let jwt_config = JwtConfig {
        secret: jwt_secret,
        ..JwtConfig::from(&config.auth)
    };

    let email = EmailService::new(config.email.clone());
    if !email.is_configured() {
        warn!("No email channel configured, verification links will only be logged");
    }

    let state = AppState::from_pool(db.pool().clone(), jwt_config, Arc::new(email));

    let cors = if config.cors.allows_any() {
        if config.is_production() {
            warn!("CORS origins \"*\" is unsafe in production, configure explicit origins");
        }
        info!("CORS allowed_origins: * (all origins)");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors
            .parsed_origins()
            .iter()
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect();
        info!(count = origins.len(), "CORS allowed_origins: {:?}", origins);
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
    };

    // CORS 位于认证之外，预检请求不会被拦截
    let app = routes::app(state)
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id));

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// 为所有响应注入 HTTP 安全头
async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("0"));
    response
}

/// 监听关闭信号
///
/// SIGTERM 或 Ctrl+C 任一到达即触发优雅关闭。信号注册失败时只记录日志，
/// 对应分支永不完成。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
