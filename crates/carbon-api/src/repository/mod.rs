//! 仓储层
//!
//! Trait 定义与 PostgreSQL 实现

mod carbon_log_repo;
mod cfc_repo;
mod content_repo;
mod stats_repo;
mod traits;
mod user_repo;

pub use carbon_log_repo::PgCarbonLogRepository;
pub use cfc_repo::PgCfcReportRepository;
pub use content_repo::{PgBadgeRepository, PgChallengeRepository, PgRecyclingPointRepository};
pub use stats_repo::PgStatsRepository;
pub use traits::{
    AwardedLog, BadgeRepository, CarbonLogRepository, CfcReportRepository, ChallengeRepository,
    CommunityTotals, PlatformStats, RecyclingPointRepository, StatsRepository, UserRepository,
};
pub use user_repo::PgUserRepository;

use std::sync::Arc;

use sqlx::PgPool;

#[cfg(test)]
pub use traits::{
    MockBadgeRepository, MockCarbonLogRepository, MockCfcReportRepository,
    MockChallengeRepository, MockRecyclingPointRepository, MockStatsRepository,
    MockUserRepository,
};

/// 全部仓储的集合，服务层按需取用
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub carbon_logs: Arc<dyn CarbonLogRepository>,
    pub cfc_reports: Arc<dyn CfcReportRepository>,
    pub badges: Arc<dyn BadgeRepository>,
    pub challenges: Arc<dyn ChallengeRepository>,
    pub recycling_points: Arc<dyn RecyclingPointRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

impl Repositories {
    /// 基于同一个连接池创建 PostgreSQL 实现
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            carbon_logs: Arc::new(PgCarbonLogRepository::new(pool.clone())),
            cfc_reports: Arc::new(PgCfcReportRepository::new(pool.clone())),
            badges: Arc::new(PgBadgeRepository::new(pool.clone())),
            challenges: Arc::new(PgChallengeRepository::new(pool.clone())),
            recycling_points: Arc::new(PgRecyclingPointRepository::new(pool.clone())),
            stats: Arc::new(PgStatsRepository::new(pool)),
        }
    }

    /// 全部为未设置期望的 Mock，测试按需替换字段
    #[cfg(test)]
    pub fn mocked() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            carbon_logs: Arc::new(MockCarbonLogRepository::new()),
            cfc_reports: Arc::new(MockCfcReportRepository::new()),
            badges: Arc::new(MockBadgeRepository::new()),
            challenges: Arc::new(MockChallengeRepository::new()),
            recycling_points: Arc::new(MockRecyclingPointRepository::new()),
            stats: Arc::new(MockStatsRepository::new()),
        }
    }
}
