//! CFC 报告仓储

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::CfcReportRepository;
use crate::error::Result;
use crate::models::CfcReport;

pub struct PgCfcReportRepository {
    pool: PgPool,
}

impl PgCfcReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CfcReportRepository for PgCfcReportRepository {
    async fn create(
        &self,
        user_id: Uuid,
        device: String,
        issue_type: String,
        notes: Option<String>,
    ) -> Result<CfcReport> {
        let report = sqlx::query_as::<_, CfcReport>(
            r#"
            INSERT INTO cfc_reports (user_id, device, issue_type, notes, date)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, user_id, device, issue_type, notes, date, created_at
            "#,
        )
        .bind(user_id)
        .bind(device)
        .bind(issue_type)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<CfcReport>> {
        let reports = sqlx::query_as::<_, CfcReport>(
            r#"
            SELECT id, user_id, device, issue_type, notes, date, created_at
            FROM cfc_reports
            WHERE user_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    async fn list_all(&self, skip: i64, limit: i64, user_id: Option<Uuid>) -> Result<Vec<CfcReport>> {
        let reports = sqlx::query_as::<_, CfcReport>(
            r#"
            SELECT id, user_id, device, issue_type, notes, date, created_at
            FROM cfc_reports
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

        Ok(reports)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cfc_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
