//! 运营内容实体：徽章、挑战、回收点

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// 徽章
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Badge {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// common / rare / epic / legendary
    pub rarity: String,
    pub points_required: i32,
    pub created_at: DateTime<Utc>,
}

/// 挑战
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Challenge {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub current_unit: String,
    pub reward_points: i32,
    pub badge_reward: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// 回收点
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RecyclingPoint {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub waste_types_accepted: Vec<String>,
    pub opening_hours: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecyclingPoint {
    /// 是否接收指定类型的垃圾（不区分大小写）
    pub fn accepts(&self, waste_type: &str) -> bool {
        self.waste_types_accepted
            .iter()
            .any(|t| t.eq_ignore_ascii_case(waste_type))
    }
}
