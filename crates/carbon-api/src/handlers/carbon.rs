//! 碳排放记录 API 处理器
//!
//! 记录的增删查、统计与建议，以及报表、趋势和影响分析

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use footprint::{
    CalcOptions, Calculation, Category, CommunityImpact, MonthlyReport, TrendAnalysis,
    UserImpact, UserSuggestions, WeeklyReport, calculate, calculator, suggestion,
};
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CalculateRequest, CarbonLogCreated, CarbonStats, CreateCarbonLogRequest,
        DailyTipResponse, DaysQuery, LogListQuery, LogListResponse, MonthlyReportQuery,
        SuggestionQuery, WeeklyReportQuery,
    },
    error::ApiError,
    middleware::CurrentUser,
    state::AppState,
};

/// 记录列表
///
/// GET /api/v1/carbon/logs
pub async fn list_logs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<LogListQuery>,
) -> Result<Json<LogListResponse>, ApiError> {
    query.validate()?;

    let page = state
        .carbon
        .list_logs(user.id, query.limit, query.offset)
        .await?;
    Ok(Json(page))
}

/// 新建记录
///
/// POST /api/v1/carbon/logs
pub async fn create_log(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateCarbonLogRequest>,
) -> Result<Json<CarbonLogCreated>, ApiError> {
    req.validate()?;

    let created = state.carbon.create_log(&user, req, Utc::now()).await?;
    Ok(Json(created))
}

/// 个人统计
///
/// GET /api/v1/carbon/stats
pub async fn stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<CarbonStats>>, ApiError> {
    let stats = state.carbon.stats(user.id, Utc::now()).await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// 个性化建议
///
/// GET /api/v1/carbon/suggestions
pub async fn suggestions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<ApiResponse<UserSuggestions>>, ApiError> {
    let result = state
        .carbon
        .suggestions(user.id, query.limit, query.days, Utc::now())
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// 每日提示
///
/// GET /api/v1/carbon/suggestions/daily-tip
pub async fn daily_tip() -> Json<ApiResponse<DailyTipResponse>> {
    Json(ApiResponse::success(DailyTipResponse {
        tip: suggestion::daily_tip(),
    }))
}

/// 排放预估（不落库）
///
/// POST /api/v1/carbon/calculate
pub async fn calculate_preview(
    Json(req): Json<CalculateRequest>,
) -> Result<Json<ApiResponse<Calculation>>, ApiError> {
    if !req.amount.is_finite() || req.amount < 0.0 {
        return Err(ApiError::Validation(
            "amount must be a non-negative number".to_string(),
        ));
    }

    let options = CalcOptions {
        passengers: req.passengers,
        unit: req.unit,
    };
    let result = calculate(&req.category, &req.activity, req.amount, &options);
    Ok(Json(ApiResponse::success(result)))
}

/// 排放因子表
///
/// GET /api/v1/carbon/factors
pub async fn factors() -> Json<ApiResponse<BTreeMap<&'static str, BTreeMap<&'static str, f64>>>> {
    let tables = Category::ALL
        .iter()
        .map(|c| {
            // 重复键以后出现的为准
            let table: BTreeMap<&'static str, f64> =
                calculator::factors(*c).iter().copied().collect();
            (c.as_str(), table)
        })
        .collect();
    Json(ApiResponse::success(tables))
}

/// 周报
///
/// GET /api/v1/carbon/reports/weekly
pub async fn weekly_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<WeeklyReportQuery>,
) -> Result<Json<ApiResponse<WeeklyReport>>, ApiError> {
    let report = state
        .carbon
        .weekly_report(user.id, query.week_start, Utc::now())
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

/// 月报
///
/// GET /api/v1/carbon/reports/monthly
pub async fn monthly_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<MonthlyReportQuery>,
) -> Result<Json<ApiResponse<MonthlyReport>>, ApiError> {
    let report = state
        .carbon
        .monthly_report(user.id, query.month, query.year, Utc::now())
        .await?;
    Ok(Json(ApiResponse::success(report)))
}

/// 趋势分析
///
/// GET /api/v1/carbon/trends
pub async fn trends(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<DaysQuery>,
) -> Result<Json<ApiResponse<TrendAnalysis>>, ApiError> {
    let trend = state.carbon.trends(user.id, query.days, Utc::now()).await?;
    Ok(Json(ApiResponse::success(trend)))
}

/// 个人影响
///
/// GET /api/v1/carbon/impact
pub async fn impact(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<DaysQuery>,
) -> Result<Json<ApiResponse<UserImpact>>, ApiError> {
    let impact = state.carbon.impact(user.id, query.days, Utc::now()).await?;
    Ok(Json(ApiResponse::success(impact)))
}

/// 社区影响
///
/// GET /api/v1/carbon/impact/community
pub async fn community_impact(
    State(state): State<AppState>,
    Query(query): Query<DaysQuery>,
) -> Result<Json<ApiResponse<CommunityImpact>>, ApiError> {
    let impact = state.carbon.community_impact(query.days, Utc::now()).await?;
    Ok(Json(ApiResponse::success(impact)))
}
