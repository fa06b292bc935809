//! 碳排放记录仓储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use footprint::{LogEntry, UserStats, gamification};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use super::traits::{AwardedLog, CarbonLogRepository, CommunityTotals};
use crate::error::{ApiError, Result};
use crate::models::{CarbonLog, NewCarbonLog};

/// 碳排放记录仓储
pub struct PgCarbonLogRepository {
    pool: PgPool,
}

impl PgCarbonLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarbonLogRepository for PgCarbonLogRepository {
    async fn create_with_award(
        &self,
        log: NewCarbonLog,
        points: i32,
        now: DateTime<Utc>,
    ) -> Result<AwardedLog> {
        let mut tx = self.pool.begin().await?;

        let (total_points, level, eco_score): (i32, i32, f64) = sqlx::query_as(
            "SELECT total_points, level, eco_score FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(log.user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

        let created = sqlx::query_as::<_, CarbonLog>(
            r#"
            INSERT INTO carbon_logs (user_id, category, activity, carbon_amount_kg, meta_data)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, category, activity, carbon_amount_kg, meta_data, created_at
            "#,
        )
        .bind(log.user_id)
        .bind(&log.category)
        .bind(&log.activity)
        .bind(log.carbon_amount_kg)
        .bind(&log.meta_data)
        .fetch_one(&mut *tx)
        .await?;

        let entries = fetch_entries(&mut *tx, log.user_id, None).await?;
        let current = UserStats {
            total_points,
            level,
            eco_score,
        };
        let stats = gamification::apply_log(current, points, &entries, now);

        sqlx::query(
            r#"
            UPDATE users
            SET total_points = $2, level = $3, eco_score = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(log.user_id)
        .bind(stats.total_points)
        .bind(stats.level)
        .bind(stats.eco_score)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AwardedLog {
            log: created,
            stats,
            entries,
        })
    }

    async fn list_by_user(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<CarbonLog>> {
        let logs = sqlx::query_as::<_, CarbonLog>(
            r#"
            SELECT id, user_id, category, activity, carbon_amount_kg, meta_data, created_at
            FROM carbon_logs
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM carbon_logs WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn entries_by_user(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>> {
        fetch_entries(&self.pool, user_id, since).await
    }

    async fn community_totals(&self, since: DateTime<Utc>) -> Result<CommunityTotals> {
        let totals = sqlx::query_as::<_, CommunityTotals>(
            r#"
            SELECT COALESCE(SUM(carbon_amount_kg), 0)::float8 AS total_kg,
                   COUNT(DISTINCT user_id) AS active_users
            FROM carbon_logs
            WHERE created_at >= $1
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    async fn list_all(&self, skip: i64, limit: i64, user_id: Option<Uuid>) -> Result<Vec<CarbonLog>> {
        let logs = sqlx::query_as::<_, CarbonLog>(
            r#"
            SELECT id, user_id, category, activity, carbon_amount_kg, meta_data, created_at
            FROM carbon_logs
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM carbon_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// 按时间升序读取记录，供事务内与连接池共用
async fn fetch_entries<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<LogEntry>> {
    let rows: Vec<(String, String, f64, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT category, activity, carbon_amount_kg, created_at
        FROM carbon_logs
        WHERE user_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(executor)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(category, activity, kg, created_at)| {
            LogEntry::new(category, activity, kg, created_at)
        })
        .collect())
}
