//! 管理员权限检查中间件

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::auth::CurrentUser;
use crate::error::ApiError;

/// 仅允许管理员访问
///
/// 依赖 `auth_middleware` 先注入 `CurrentUser`
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<CurrentUser>() {
        Some(CurrentUser(user)) if user.is_admin => next.run(request).await,
        Some(_) => ApiError::Forbidden("Admin access required".to_string()).into_response(),
        None => ApiError::Unauthorized("Not authenticated".to_string()).into_response(),
    }
}
