//! JWT 认证中间件
//!
//! 验证请求中的 Bearer Token，加载对应的活跃用户并注入请求扩展

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderValue, Method, Request, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::models::User;
use crate::state::AppState;

/// 无需认证的路由前缀
const PUBLIC_PATHS: [&str; 16] = [
    "/health",
    "/ready",
    "/api/v1/auth/register",
    "/api/v1/auth/login",
    "/api/v1/auth/verify-email",
    "/api/v1/carbon/suggestions/daily-tip",
    "/api/v1/carbon/calculate",
    "/api/v1/carbon/factors",
    "/api/v1/carbon/impact/community",
    "/api/v1/cfc/calculate",
    "/api/v1/cfc/refrigerant-types",
    "/api/v1/cfc/devices",
    "/api/v1/cfc/issue-types",
    "/api/v1/cfc/device-defaults",
    "/api/v1/gamification",
    "/api/v1/recycling",
];

/// 是否为公开路由
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|p| path.starts_with(p))
}

/// 当前登录用户
///
/// 由 `auth_middleware` 注入，handler 直接作为提取器使用
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
    }
}

/// 认证中间件
///
/// 对于公开路由与 CORS 预检请求直接放行
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let Some(token) = token else {
        return unauthorized(ApiError::Unauthorized("Not authenticated".to_string()));
    };

    match state.auth.authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(e @ ApiError::Unauthorized(_)) => unauthorized(e),
        Err(e) => e.into_response(),
    }
}

/// 401 响应附带 `WWW-Authenticate: Bearer`
fn unauthorized(err: ApiError) -> Response {
    let mut response = err.into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
