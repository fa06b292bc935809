//! 碳排放记录与 CFC 报告实体

use chrono::{DateTime, Utc};
use footprint::LogEntry;
use serde::Serialize;
use uuid::Uuid;

/// 碳排放记录
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CarbonLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub activity: String,
    pub carbon_amount_kg: f64,
    pub meta_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<&CarbonLog> for LogEntry {
    fn from(log: &CarbonLog) -> Self {
        LogEntry::new(
            log.category.clone(),
            log.activity.clone(),
            log.carbon_amount_kg,
            log.created_at,
        )
    }
}

/// 待写入的碳排放记录
#[derive(Debug, Clone, PartialEq)]
pub struct NewCarbonLog {
    pub user_id: Uuid,
    pub category: String,
    pub activity: String,
    pub carbon_amount_kg: f64,
    pub meta_data: Option<serde_json::Value>,
}

/// CFC 泄漏/处置报告
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CfcReport {
    pub id: Uuid,
    pub user_id: Uuid,
    /// AC / Refrigerator
    pub device: String,
    /// Gas leak / Disposal / Servicing
    pub issue_type: String,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
