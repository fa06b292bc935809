//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use footprint::{GeneratedSuggestions, UserStats};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{CarbonLog, Challenge, RecyclingPoint, User};

/// API 统一响应
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 仅包含提示信息的响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// "<Entity> deleted successfully"
    pub fn deleted(entity: &str) -> Self {
        Self::new(format!("{} deleted successfully", entity))
    }
}

// ==================== 认证 ====================

/// 用户信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub eco_score: f64,
    pub level: i32,
    pub total_points: i32,
    pub is_admin: bool,
    pub is_active: bool,
    pub email_verified: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            eco_score: user.eco_score,
            level: user.level,
            total_points: user.total_points,
            is_admin: user.is_admin,
            is_active: user.is_active,
            email_verified: user.email_verified,
        }
    }
}

/// 登录/注册响应
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: &User) -> Self {
        Self {
            access_token,
            token_type: "bearer",
            user: user.into(),
        }
    }
}

/// 重发验证邮件结果
#[derive(Debug, Serialize)]
pub struct VerificationSentResponse {
    pub message: &'static str,
    pub email_sent: bool,
}

// ==================== 碳排放记录 ====================

/// 分页信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

/// 记录列表响应
#[derive(Debug, Serialize)]
pub struct LogListResponse {
    pub success: bool,
    pub data: Vec<CarbonLog>,
    pub pagination: Pagination,
}

/// 新建记录响应：记录本身、奖励积分、更新后的统计与建议
#[derive(Debug, Serialize)]
pub struct CarbonLogCreated {
    pub success: bool,
    pub data: CarbonLog,
    pub points_awarded: i32,
    pub user_stats: UserStats,
    pub suggestions: GeneratedSuggestions,
}

/// 个人排放统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarbonStats {
    pub total_kg: f64,
    pub daily_average_kg: f64,
    pub monthly_kg: f64,
    pub by_category: BTreeMap<String, f64>,
}

/// 每日提示
#[derive(Debug, Serialize)]
pub struct DailyTipResponse {
    pub tip: &'static str,
}

// ==================== 游戏化 ====================

/// 排行榜条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub eco_score: f64,
    pub total_points: i32,
    pub level: i32,
    pub rank: usize,
}

/// 挑战
///
/// `id` 为字符串，以兼容内置挑战
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub current_unit: String,
    pub reward_points: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ChallengeDto {
    /// 数据库中没有进行中挑战时返回的内置挑战
    pub fn carbon_free_week() -> Self {
        Self {
            id: "challenge-1".to_string(),
            name: "Carbon Free Week".to_string(),
            description: Some("Go 7 days without adding carbon footprint".to_string()),
            target_value: 7.0,
            current_unit: "days".to_string(),
            reward_points: 500,
            expires_at: None,
        }
    }
}

impl From<Challenge> for ChallengeDto {
    fn from(c: Challenge) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            description: c.description,
            target_value: c.target_value,
            current_unit: c.current_unit,
            reward_points: c.reward_points,
            expires_at: c.expires_at,
        }
    }
}

// ==================== 回收 ====================

/// 附近回收点（含距离）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyRecyclingPoint {
    #[serde(flatten)]
    pub point: RecyclingPoint,
    pub distance_km: f64,
}

/// 回收提示
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecyclingTips {
    pub waste_type: String,
    pub tips: Vec<&'static str>,
}

// ==================== 管理后台 ====================

/// 管理端用户信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminUserDto {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub email_verified: bool,
    pub eco_score: f64,
    pub level: i32,
    pub total_points: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AdminUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_admin: user.is_admin,
            is_active: user.is_active,
            email_verified: user.email_verified,
            eco_score: user.eco_score,
            level: user.level,
            total_points: user.total_points,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::fixtures;

    #[test]
    fn test_api_response_skips_empty_data() {
        let response: ApiResponse<()> = ApiResponse {
            success: true,
            code: "SUCCESS".into(),
            message: "Success".into(),
            data: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("data").is_none());

        let json = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(json["data"], 1);
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_token_response_shape() {
        let user = fixtures::user();
        let json = serde_json::to_value(TokenResponse::bearer("tok".into(), &user)).unwrap();

        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["user"]["email"], user.email.as_str());
        assert_eq!(json["user"]["level"], 1);
        assert!(json["user"].get("hashed_password").is_none());
    }

    #[test]
    fn test_deleted_message() {
        assert_eq!(
            MessageResponse::deleted("Recycling point").message,
            "Recycling point deleted successfully"
        );
    }

    #[test]
    fn test_builtin_challenge() {
        let c = ChallengeDto::carbon_free_week();
        assert_eq!(c.target_value, 7.0);
        assert_eq!(c.reward_points, 500);
        assert!(c.expires_at.is_none());
    }
}
