//! 认证 API 处理器

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, LoginRequest, MessageResponse, RegisterRequest, TokenResponse, UserResponse,
        VerificationSentResponse, VerifyEmailQuery,
    },
    error::ApiError,
    middleware::CurrentUser,
    state::AppState,
};

/// 注册
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    req.validate()?;

    let token = state.auth.register(&req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// 登录（表单或 JSON）
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    req: LoginRequest,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.auth.login(&req).await?;
    Ok(Json(token))
}

/// 当前用户信息
///
/// GET /api/v1/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// 验证邮箱
///
/// GET /api/v1/auth/verify-email?token=
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let result = state.auth.verify_email(&query.token, Utc::now()).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// 重新发送验证邮件
///
/// POST /api/v1/auth/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<VerificationSentResponse>>, ApiError> {
    let result = state.auth.resend_verification(&user, Utc::now()).await?;
    Ok(Json(ApiResponse::success(result)))
}
