//! 管理后台 API 处理器
//!
//! 所有端点位于 `/api/v1/admin` 下，需管理员权限

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        AdminRecordQuery, AdminUserDto, AdminUserQuery, ApiResponse, CreateBadgeRequest,
        CreateChallengeRequest, CreateRecyclingPointRequest, MessageResponse, UpdateBadgeRequest,
        UpdateChallengeRequest, UpdateRecyclingPointRequest, UpdateUserRequest,
    },
    error::ApiError,
    middleware::CurrentUser,
    models::{Badge, CarbonLog, CfcReport, Challenge, RecyclingPoint},
    repository::PlatformStats,
    state::AppState,
};

type JsonResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

fn created<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

// ==================== 用户 ====================

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<AdminUserQuery>,
) -> JsonResult<Vec<AdminUserDto>> {
    query.validate()?;
    Ok(Json(ApiResponse::success(
        state.admin.list_users(&query).await?,
    )))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> JsonResult<AdminUserDto> {
    Ok(Json(ApiResponse::success(state.admin.get_user(id).await?)))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> JsonResult<AdminUserDto> {
    req.validate()?;
    let user = state.admin.update_user(&admin, id, &req).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// 停用用户（软删除）
///
/// DELETE /api/v1/admin/users/{id}
pub async fn deactivate_user(
    State(state): State<AppState>,
    CurrentUser(admin): CurrentUser,
    Path(id): Path<Uuid>,
) -> JsonResult<MessageResponse> {
    let result = state.admin.deactivate_user(&admin, id).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /api/v1/admin/stats
pub async fn platform_stats(State(state): State<AppState>) -> JsonResult<PlatformStats> {
    let stats = state.admin.platform_stats(Utc::now()).await?;
    Ok(Json(ApiResponse::success(stats)))
}

// ==================== 记录 ====================

/// GET /api/v1/admin/carbon-logs
pub async fn list_carbon_logs(
    State(state): State<AppState>,
    Query(query): Query<AdminRecordQuery>,
) -> JsonResult<Vec<CarbonLog>> {
    query.validate()?;
    Ok(Json(ApiResponse::success(
        state.admin.list_carbon_logs(&query).await?,
    )))
}

/// DELETE /api/v1/admin/carbon-logs/{id}
pub async fn delete_carbon_log(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> JsonResult<MessageResponse> {
    Ok(Json(ApiResponse::success(
        state.admin.delete_carbon_log(id).await?,
    )))
}

/// GET /api/v1/admin/cfc-reports
pub async fn list_cfc_reports(
    State(state): State<AppState>,
    Query(query): Query<AdminRecordQuery>,
) -> JsonResult<Vec<CfcReport>> {
    query.validate()?;
    Ok(Json(ApiResponse::success(
        state.admin.list_cfc_reports(&query).await?,
    )))
}

/// DELETE /api/v1/admin/cfc-reports/{id}
pub async fn delete_cfc_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> JsonResult<MessageResponse> {
    Ok(Json(ApiResponse::success(
        state.admin.delete_cfc_report(id).await?,
    )))
}

// ==================== 徽章 ====================

/// GET /api/v1/admin/badges
pub async fn list_badges(State(state): State<AppState>) -> JsonResult<Vec<Badge>> {
    Ok(Json(ApiResponse::success(state.admin.list_badges().await?)))
}

/// POST /api/v1/admin/badges
pub async fn create_badge(
    State(state): State<AppState>,
    Json(req): Json<CreateBadgeRequest>,
) -> CreatedResult<Badge> {
    req.validate()?;
    Ok(created(state.admin.create_badge(&req).await?))
}

/// PUT /api/v1/admin/badges/{id}
pub async fn update_badge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBadgeRequest>,
) -> JsonResult<Badge> {
    req.validate()?;
    Ok(Json(ApiResponse::success(
        state.admin.update_badge(id, &req).await?,
    )))
}

/// DELETE /api/v1/admin/badges/{id}
pub async fn delete_badge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> JsonResult<MessageResponse> {
    Ok(Json(ApiResponse::success(state.admin.delete_badge(id).await?)))
}

// ==================== 挑战 ====================

/// GET /api/v1/admin/challenges
pub async fn list_challenges(State(state): State<AppState>) -> JsonResult<Vec<Challenge>> {
    Ok(Json(ApiResponse::success(
        state.admin.list_challenges().await?,
    )))
}

/// POST /api/v1/admin/challenges
pub async fn create_challenge(
    State(state): State<AppState>,
    Json(req): Json<CreateChallengeRequest>,
) -> CreatedResult<Challenge> {
    req.validate()?;
    Ok(created(state.admin.create_challenge(&req).await?))
}

/// PUT /api/v1/admin/challenges/{id}
pub async fn update_challenge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateChallengeRequest>,
) -> JsonResult<Challenge> {
    req.validate()?;
    Ok(Json(ApiResponse::success(
        state.admin.update_challenge(id, &req).await?,
    )))
}

/// DELETE /api/v1/admin/challenges/{id}
pub async fn delete_challenge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> JsonResult<MessageResponse> {
    Ok(Json(ApiResponse::success(
        state.admin.delete_challenge(id).await?,
    )))
}

// ==================== 回收点 ====================

/// GET /api/v1/admin/recycling-points
pub async fn list_recycling_points(
    State(state): State<AppState>,
) -> JsonResult<Vec<RecyclingPoint>> {
    Ok(Json(ApiResponse::success(
        state.admin.list_recycling_points().await?,
    )))
}

/// POST /api/v1/admin/recycling-points
pub async fn create_recycling_point(
    State(state): State<AppState>,
    Json(req): Json<CreateRecyclingPointRequest>,
) -> CreatedResult<RecyclingPoint> {
    req.validate()?;
    Ok(created(state.admin.create_recycling_point(&req).await?))
}

/// PUT /api/v1/admin/recycling-points/{id}
pub async fn update_recycling_point(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRecyclingPointRequest>,
) -> JsonResult<RecyclingPoint> {
    req.validate()?;
    Ok(Json(ApiResponse::success(
        state.admin.update_recycling_point(id, &req).await?,
    )))
}

/// DELETE /api/v1/admin/recycling-points/{id}
pub async fn delete_recycling_point(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> JsonResult<MessageResponse> {
    Ok(Json(ApiResponse::success(
        state.admin.delete_recycling_point(id).await?,
    )))
}
