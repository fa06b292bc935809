//! 用户实体

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 用户实体
///
/// 包含凭据、游戏化计数与管理标记
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub hashed_password: String,
    pub avatar_url: Option<String>,
    pub eco_score: f64,
    pub level: i32,
    pub total_points: i32,
    pub is_admin: bool,
    pub is_active: bool,
    pub email_verified: bool,
    /// 验证令牌的 SHA-256 摘要
    pub verification_token: Option<String>,
    pub verification_token_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 注册时写入的用户数据
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub hashed_password: String,
    pub verification_token: String,
    pub verification_token_expires: DateTime<Utc>,
}
