//! 请求 DTO 定义
//!
//! 所有 REST API 的请求参数和请求体结构

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;

fn default_limit() -> i64 {
    50
}

fn default_days() -> i64 {
    30
}

// ==================== 认证 ====================

/// 注册请求
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "password must be 1-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
}

/// 登录请求
///
/// 兼容 OAuth2 表单（`username` 字段存放邮箱）和 JSON（`email` 或 `username`）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// 登录标识，`username` 优先
    pub fn identifier(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.is_empty())
    }
}

impl<S> FromRequest<S> for LoginRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(e.body_text()))?;
            Ok(body)
        } else {
            let Form(body) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(e.body_text()))?;
            Ok(body)
        }
    }
}

/// 邮箱验证参数
#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

// ==================== 碳排放记录 ====================

/// 记录列表分页参数
#[derive(Debug, Deserialize, Validate)]
pub struct LogListQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,
}

/// 新建碳排放记录
///
/// `carbon_amount_kg` 为 0 且带有 metadata 时按排放因子自动计算
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCarbonLogRequest {
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 255))]
    pub activity: String,
    #[serde(default)]
    pub carbon_amount_kg: f64,
    pub metadata: Option<serde_json::Value>,
}

/// 建议查询参数
#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_suggestion_limit() -> usize {
    5
}

/// 排放预估请求
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub category: String,
    pub activity: String,
    pub amount: f64,
    pub passengers: Option<u32>,
    pub unit: Option<String>,
}

/// 周报参数
#[derive(Debug, Deserialize)]
pub struct WeeklyReportQuery {
    pub week_start: Option<DateTime<Utc>>,
}

/// 月报参数
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// 统计窗口参数
#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

// ==================== CFC ====================

/// CFC 报告请求
#[derive(Debug, Deserialize)]
pub struct CreateCfcReportRequest {
    pub device: String,
    pub issue_type: String,
    pub notes: Option<String>,
}

// ==================== 游戏化与回收 ====================

/// 排行榜参数
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// 附近回收点查询
#[derive(Debug, Deserialize, Validate)]
pub struct RecyclingPointsQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    #[validate(range(min = 0.0))]
    pub radius_km: f64,
    pub waste_type: Option<String>,
}

fn default_radius_km() -> f64 {
    10.0
}

// ==================== 管理后台 ====================

/// 用户列表筛选
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AdminUserQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
    pub search: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

/// 管理端用户部分更新
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub eco_score: Option<f64>,
    #[validate(range(min = 1, max = 1_000_001))]
    pub level: Option<i32>,
    #[validate(range(min = 0, max = 100_000_000))]
    pub total_points: Option<i32>,
}

/// 记录类列表（碳排放记录、CFC 报告）筛选
#[derive(Debug, Deserialize, Validate)]
pub struct AdminRecordQuery {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
    pub user_id: Option<Uuid>,
}

/// 新建徽章
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBadgeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    #[serde(default = "default_rarity")]
    pub rarity: String,
    #[serde(default)]
    pub points_required: i32,
}

fn default_rarity() -> String {
    "common".to_string()
}

/// 徽章部分更新
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct UpdateBadgeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub rarity: Option<String>,
    pub points_required: Option<i32>,
}

/// 新建挑战
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub target_value: f64,
    #[serde(default = "default_unit")]
    pub current_unit: String,
    #[serde(default)]
    pub reward_points: i32,
    pub badge_reward: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_unit() -> String {
    "kg".to_string()
}

fn default_true() -> bool {
    true
}

/// 挑战部分更新
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct UpdateChallengeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<f64>,
    pub current_unit: Option<String>,
    pub reward_points: Option<i32>,
    pub badge_reward: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// 新建回收点
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecyclingPointRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub waste_types_accepted: Vec<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// 回收点部分更新
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct UpdateRecyclingPointRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub waste_types_accepted: Option<Vec<String>>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub verified: Option<bool>,
}
