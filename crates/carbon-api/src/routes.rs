//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{
    handlers,
    middleware::{auth_middleware, require_admin},
    state::AppState,
};

/// 构建认证相关的路由
///
/// register/login/verify-email 为公开路由，其余需要登录
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/verify-email", get(handlers::auth::verify_email))
        .route(
            "/auth/resend-verification",
            post(handlers::auth::resend_verification),
        )
}

/// 构建碳排放记录、建议与报表路由
pub fn carbon_routes() -> Router<AppState> {
    Router::new()
        .route("/carbon/logs", get(handlers::carbon::list_logs))
        .route("/carbon/logs", post(handlers::carbon::create_log))
        .route("/carbon/stats", get(handlers::carbon::stats))
        .route("/carbon/suggestions", get(handlers::carbon::suggestions))
        .route(
            "/carbon/suggestions/daily-tip",
            get(handlers::carbon::daily_tip),
        )
        // 计算器
        .route("/carbon/calculate", post(handlers::carbon::calculate_preview))
        .route("/carbon/factors", get(handlers::carbon::factors))
        // 报表与分析
        .route(
            "/carbon/reports/weekly",
            get(handlers::carbon::weekly_report),
        )
        .route(
            "/carbon/reports/monthly",
            get(handlers::carbon::monthly_report),
        )
        .route("/carbon/trends", get(handlers::carbon::trends))
        .route("/carbon/impact", get(handlers::carbon::impact))
        .route(
            "/carbon/impact/community",
            get(handlers::carbon::community_impact),
        )
}

/// 构建 CFC 路由
pub fn cfc_routes() -> Router<AppState> {
    Router::new()
        .route("/cfc/report", post(handlers::cfc::create_report))
        .route("/cfc/my-reports", get(handlers::cfc::my_reports))
        .route("/cfc/calculate", post(handlers::cfc::calculate))
        .route(
            "/cfc/refrigerant-types",
            get(handlers::cfc::refrigerant_types),
        )
        .route("/cfc/devices", get(handlers::cfc::devices))
        .route("/cfc/issue-types", get(handlers::cfc::issue_types))
        .route(
            "/cfc/device-defaults/{device}",
            get(handlers::cfc::device_defaults),
        )
}

/// 构建游戏化路由（公开）
pub fn gamification_routes() -> Router<AppState> {
    Router::new()
        .route("/gamification/badges", get(handlers::gamification::badges))
        .route(
            "/gamification/leaderboard",
            get(handlers::gamification::leaderboard),
        )
        .route(
            "/gamification/challenges",
            get(handlers::gamification::challenges),
        )
}

/// 构建回收路由（公开）
pub fn recycling_routes() -> Router<AppState> {
    Router::new()
        .route("/recycling/points", get(handlers::recycling::points))
        .route(
            "/recycling/tips/{waste_type}",
            get(handlers::recycling::tips),
        )
}

/// 构建管理后台路由
///
/// 整组路由挂载 `require_admin`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // 用户管理
        .route("/admin/users", get(handlers::admin::list_users))
        .route("/admin/users/{id}", get(handlers::admin::get_user))
        .route("/admin/users/{id}", put(handlers::admin::update_user))
        .route(
            "/admin/users/{id}",
            delete(handlers::admin::deactivate_user),
        )
        .route("/admin/stats", get(handlers::admin::platform_stats))
        // 记录管理
        .route(
            "/admin/carbon-logs",
            get(handlers::admin::list_carbon_logs),
        )
        .route(
            "/admin/carbon-logs/{id}",
            delete(handlers::admin::delete_carbon_log),
        )
        .route(
            "/admin/cfc-reports",
            get(handlers::admin::list_cfc_reports),
        )
        .route(
            "/admin/cfc-reports/{id}",
            delete(handlers::admin::delete_cfc_report),
        )
        // 徽章
        .route("/admin/badges", get(handlers::admin::list_badges))
        .route("/admin/badges", post(handlers::admin::create_badge))
        .route("/admin/badges/{id}", put(handlers::admin::update_badge))
        .route("/admin/badges/{id}", delete(handlers::admin::delete_badge))
        // 挑战
        .route("/admin/challenges", get(handlers::admin::list_challenges))
        .route("/admin/challenges", post(handlers::admin::create_challenge))
        .route(
            "/admin/challenges/{id}",
            put(handlers::admin::update_challenge),
        )
        .route(
            "/admin/challenges/{id}",
            delete(handlers::admin::delete_challenge),
        )
        // 回收点
        .route(
            "/admin/recycling-points",
            get(handlers::admin::list_recycling_points),
        )
        .route(
            "/admin/recycling-points",
            post(handlers::admin::create_recycling_point),
        )
        .route(
            "/admin/recycling-points/{id}",
            put(handlers::admin::update_recycling_point),
        )
        .route(
            "/admin/recycling-points/{id}",
            delete(handlers::admin::delete_recycling_point),
        )
        .route_layer(middleware::from_fn(require_admin))
}

/// 构建完整的 API 路由
///
/// 不含前缀，由调用方挂载到 `/api/v1`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(carbon_routes())
        .merge(cfc_routes())
        .merge(gamification_routes())
        .merge(recycling_routes())
        .merge(admin_routes())
}

/// 构建应用路由：API、健康检查与认证中间件
///
/// CORS、安全头与可观测性中间件由 main.rs 叠加
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
