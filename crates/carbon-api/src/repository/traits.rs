//! 仓储 Trait 定义
//!
//! 服务层与 handler 依赖抽象而非具体实现，测试时使用 mockall 生成的 Mock

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use footprint::{LogEntry, UserStats};
use serde::Serialize;
use uuid::Uuid;

use crate::dto::{
    AdminUserQuery, CreateBadgeRequest, CreateChallengeRequest, CreateRecyclingPointRequest,
    UpdateBadgeRequest, UpdateChallengeRequest, UpdateRecyclingPointRequest, UpdateUserRequest,
};
use crate::error::Result;
use crate::models::{
    Badge, CarbonLog, CfcReport, Challenge, NewCarbonLog, NewUser, RecyclingPoint, User,
};

/// 社区范围内某时间窗口的排放汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, sqlx::FromRow)]
pub struct CommunityTotals {
    pub total_kg: f64,
    /// 窗口内有记录的去重用户数
    pub active_users: i64,
}

/// 写入记录并结算积分后的结果
#[derive(Debug, Clone, PartialEq)]
pub struct AwardedLog {
    pub log: CarbonLog,
    /// 结算后的用户统计
    pub stats: UserStats,
    /// 该用户的全部记录（含新记录）
    pub entries: Vec<LogEntry>,
}

/// 平台统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub active_users: i64,
    pub admin_users: i64,
    pub total_carbon_logs: i64,
    pub total_carbon_saved_kg: f64,
    pub total_cfc_reports: i64,
    pub total_badges: i64,
    pub total_challenges: i64,
    pub total_recycling_points: i64,
    pub users_this_month: i64,
    pub carbon_logs_this_month: i64,
}

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn create(&self, user: NewUser) -> Result<User>;

    // 游戏化
    async fn leaderboard(&self, limit: i64) -> Result<Vec<User>>;

    // 邮箱验证
    async fn set_verification_token(
        &self,
        id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
    async fn find_by_verification_token(&self, token_hash: &str) -> Result<Option<User>>;
    async fn mark_verified(&self, id: Uuid) -> Result<()>;

    // 管理后台
    async fn list(&self, query: &AdminUserQuery) -> Result<Vec<User>>;
    async fn update(&self, id: Uuid, changes: &UpdateUserRequest) -> Result<Option<User>>;
    async fn deactivate(&self, id: Uuid) -> Result<bool>;
}

/// 碳排放记录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarbonLogRepository: Send + Sync {
    /// 在同一事务内写入记录并累加积分
    ///
    /// 先锁定用户行，同一用户的并发写入按顺序结算；任一步失败则整体回滚。
    async fn create_with_award(
        &self,
        log: NewCarbonLog,
        points: i32,
        now: DateTime<Utc>,
    ) -> Result<AwardedLog>;
    async fn list_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<CarbonLog>>;
    async fn count_by_user(&self, user_id: Uuid) -> Result<i64>;

    /// 用户在 `since` 之后（为空则全部）的记录，供计算引擎聚合
    async fn entries_by_user(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>>;

    async fn community_totals(&self, since: DateTime<Utc>) -> Result<CommunityTotals>;

    // 管理后台
    async fn list_all(&self, skip: i64, limit: i64, user_id: Option<Uuid>) -> Result<Vec<CarbonLog>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// CFC 报告仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CfcReportRepository: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        device: String,
        issue_type: String,
        notes: Option<String>,
    ) -> Result<CfcReport>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CfcReport>>;
    async fn list_all(&self, skip: i64, limit: i64, user_id: Option<Uuid>) -> Result<Vec<CfcReport>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// 徽章仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Badge>>;
    async fn create(&self, req: &CreateBadgeRequest) -> Result<Badge>;
    async fn update(&self, id: Uuid, req: &UpdateBadgeRequest) -> Result<Option<Badge>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// 挑战仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Challenge>>;
    /// 启用且未过期的挑战
    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Challenge>>;
    async fn create(&self, req: &CreateChallengeRequest) -> Result<Challenge>;
    async fn update(&self, id: Uuid, req: &UpdateChallengeRequest) -> Result<Option<Challenge>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// 回收点仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecyclingPointRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<RecyclingPoint>>;
    async fn create(&self, req: &CreateRecyclingPointRequest) -> Result<RecyclingPoint>;
    async fn update(
        &self,
        id: Uuid,
        req: &UpdateRecyclingPointRequest,
    ) -> Result<Option<RecyclingPoint>>;
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// 统计与健康检查
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn platform_stats(&self, month_start: DateTime<Utc>) -> Result<PlatformStats>;
    async fn ping(&self) -> Result<()>;
}
