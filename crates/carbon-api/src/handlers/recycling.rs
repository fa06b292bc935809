//! 回收 API 处理器（公开）

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    dto::{ApiResponse, NearbyRecyclingPoint, RecyclingPointsQuery, RecyclingTips},
    error::ApiError,
    service::recycling,
    state::AppState,
};

/// 附近回收点
///
/// GET /api/v1/recycling/points
pub async fn points(
    State(state): State<AppState>,
    Query(query): Query<RecyclingPointsQuery>,
) -> Result<Json<ApiResponse<Vec<NearbyRecyclingPoint>>>, ApiError> {
    query.validate()?;

    let all = state.repos.recycling_points.list().await?;
    let nearby = recycling::nearby(
        all,
        query.latitude,
        query.longitude,
        query.radius_km,
        query.waste_type.as_deref(),
    );

    Ok(Json(ApiResponse::success(nearby)))
}

/// 回收提示
///
/// GET /api/v1/recycling/tips/{waste_type}
pub async fn tips(Path(waste_type): Path<String>) -> Json<ApiResponse<RecyclingTips>> {
    Json(ApiResponse::success(recycling::tips(&waste_type)))
}
