//! CFC API 处理器

use axum::{
    Json,
    extract::{Path, State},
};
use footprint::{CfcImpact, CfcInput, DeviceDefaults, calculate_cfc_impact, cfc};

use crate::{
    dto::{ApiResponse, CreateCfcReportRequest},
    error::ApiError,
    middleware::CurrentUser,
    models::CfcReport,
    state::AppState,
};

/// 上报 CFC 问题
///
/// POST /api/v1/cfc/report
pub async fn create_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateCfcReportRequest>,
) -> Result<Json<ApiResponse<CfcReport>>, ApiError> {
    let report = state.cfc.create_report(user.id, req).await?;
    Ok(Json(ApiResponse::success(report)))
}

/// 我的报告
///
/// GET /api/v1/cfc/my-reports
pub async fn my_reports(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<Vec<CfcReport>>>, ApiError> {
    let reports = state.cfc.my_reports(user.id).await?;
    Ok(Json(ApiResponse::success(reports)))
}

/// 估算制冷剂泄漏影响
///
/// POST /api/v1/cfc/calculate
pub async fn calculate(
    Json(input): Json<CfcInput>,
) -> Result<Json<ApiResponse<CfcImpact>>, ApiError> {
    if input
        .refrigerant_amount_kg
        .is_some_and(|kg| !kg.is_finite() || kg < 0.0)
    {
        return Err(ApiError::Validation(
            "refrigerant_amount_kg must be a non-negative number".to_string(),
        ));
    }
    Ok(Json(ApiResponse::success(calculate_cfc_impact(&input))))
}

/// 支持的制冷剂类型
///
/// GET /api/v1/cfc/refrigerant-types
pub async fn refrigerant_types() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(cfc::refrigerant_types()))
}

/// 已知设备
///
/// GET /api/v1/cfc/devices
pub async fn devices() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(cfc::devices()))
}

/// 已知事件类型
///
/// GET /api/v1/cfc/issue-types
pub async fn issue_types() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(cfc::issue_types()))
}

/// 设备默认参数
///
/// GET /api/v1/cfc/device-defaults/{device}
pub async fn device_defaults(Path(device): Path<String>) -> Json<ApiResponse<DeviceDefaults>> {
    Json(ApiResponse::success(cfc::device_defaults(&device)))
}
