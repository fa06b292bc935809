//! 平台统计仓储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::{PlatformStats, StatsRepository};
use crate::error::Result;

pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn count_since(&self, sql: &str, since: DateTime<Utc>) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(sql).bind(since).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn platform_stats(&self, month_start: DateTime<Utc>) -> Result<PlatformStats> {
        let (total_carbon_saved_kg,): (f64,) =
            sqlx::query_as("SELECT COALESCE(SUM(carbon_amount_kg), 0)::float8 FROM carbon_logs")
                .fetch_one(&self.pool)
                .await?;

        let (
            total_users,
            active_users,
            admin_users,
            total_carbon_logs,
            total_cfc_reports,
            total_badges,
            total_challenges,
            total_recycling_points,
            users_this_month,
            carbon_logs_this_month,
        ) = futures::try_join!(
            self.count("SELECT COUNT(*) FROM users"),
            self.count("SELECT COUNT(*) FROM users WHERE is_active = TRUE"),
            self.count("SELECT COUNT(*) FROM users WHERE is_admin = TRUE"),
            self.count("SELECT COUNT(*) FROM carbon_logs"),
            self.count("SELECT COUNT(*) FROM cfc_reports"),
            self.count("SELECT COUNT(*) FROM badges"),
            self.count("SELECT COUNT(*) FROM challenges"),
            self.count("SELECT COUNT(*) FROM recycling_points"),
            self.count_since("SELECT COUNT(*) FROM users WHERE created_at >= $1", month_start),
            self.count_since(
                "SELECT COUNT(*) FROM carbon_logs WHERE created_at >= $1",
                month_start
            ),
        )?;

        Ok(PlatformStats {
            total_users,
            active_users,
            admin_users,
            total_carbon_logs,
            total_carbon_saved_kg,
            total_cfc_reports,
            total_badges,
            total_challenges,
            total_recycling_points,
            users_this_month,
            carbon_logs_this_month,
        })
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
