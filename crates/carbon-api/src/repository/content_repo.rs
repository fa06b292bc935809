//! 运营内容仓储：徽章、挑战、回收点
//!
//! 部分更新统一采用 `COALESCE($n, column)`，未提供的字段保持原值

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::{BadgeRepository, ChallengeRepository, RecyclingPointRepository};
use crate::dto::{
    CreateBadgeRequest, CreateChallengeRequest, CreateRecyclingPointRequest, UpdateBadgeRequest,
    UpdateChallengeRequest, UpdateRecyclingPointRequest,
};
use crate::error::{ApiError, Result};
use crate::models::{Badge, Challenge, RecyclingPoint};

const BADGE_NAME_CONFLICT: &str = "Badge with this name already exists";

// ==================== 徽章 ====================

pub struct PgBadgeRepository {
    pool: PgPool,
}

impl PgBadgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BadgeRepository for PgBadgeRepository {
    async fn list(&self) -> Result<Vec<Badge>> {
        let badges = sqlx::query_as::<_, Badge>(
            r#"
            SELECT id, name, description, icon, rarity, points_required, created_at
            FROM badges
            ORDER BY points_required ASC, name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    async fn create(&self, req: &CreateBadgeRequest) -> Result<Badge> {
        let badge = sqlx::query_as::<_, Badge>(
            r#"
            INSERT INTO badges (name, description, icon, rarity, points_required)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, icon, rarity, points_required, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.icon)
        .bind(&req.rarity)
        .bind(req.points_required)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::from_unique_violation(e, BADGE_NAME_CONFLICT))?;

        Ok(badge)
    }

    async fn update(&self, id: Uuid, req: &UpdateBadgeRequest) -> Result<Option<Badge>> {
        let badge = sqlx::query_as::<_, Badge>(
            r#"
            UPDATE badges
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                icon = COALESCE($4, icon),
                rarity = COALESCE($5, rarity),
                points_required = COALESCE($6, points_required)
            WHERE id = $1
            RETURNING id, name, description, icon, rarity, points_required, created_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.icon)
        .bind(&req.rarity)
        .bind(req.points_required)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::from_unique_violation(e, BADGE_NAME_CONFLICT))?;

        Ok(badge)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM badges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ==================== 挑战 ====================

pub struct PgChallengeRepository {
    pool: PgPool,
}

impl PgChallengeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChallengeRepository for PgChallengeRepository {
    async fn list(&self) -> Result<Vec<Challenge>> {
        let challenges = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT id, name, description, target_value, current_unit, reward_points,
                   badge_reward, expires_at, is_active, created_at
            FROM challenges
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(challenges)
    }

    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Challenge>> {
        let challenges = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT id, name, description, target_value, current_unit, reward_points,
                   badge_reward, expires_at, is_active, created_at
            FROM challenges
            WHERE is_active = TRUE AND (expires_at IS NULL OR expires_at > $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(challenges)
    }

    async fn create(&self, req: &CreateChallengeRequest) -> Result<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            INSERT INTO challenges (name, description, target_value, current_unit, reward_points,
                                    badge_reward, expires_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, target_value, current_unit, reward_points,
                      badge_reward, expires_at, is_active, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.target_value)
        .bind(&req.current_unit)
        .bind(req.reward_points)
        .bind(req.badge_reward)
        .bind(req.expires_at)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(challenge)
    }

    async fn update(&self, id: Uuid, req: &UpdateChallengeRequest) -> Result<Option<Challenge>> {
        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            UPDATE challenges
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                target_value = COALESCE($4, target_value),
                current_unit = COALESCE($5, current_unit),
                reward_points = COALESCE($6, reward_points),
                badge_reward = COALESCE($7, badge_reward),
                expires_at = COALESCE($8, expires_at),
                is_active = COALESCE($9, is_active)
            WHERE id = $1
            RETURNING id, name, description, target_value, current_unit, reward_points,
                      badge_reward, expires_at, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.target_value)
        .bind(&req.current_unit)
        .bind(req.reward_points)
        .bind(req.badge_reward)
        .bind(req.expires_at)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(challenge)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM challenges WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ==================== 回收点 ====================

pub struct PgRecyclingPointRepository {
    pool: PgPool,
}

impl PgRecyclingPointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecyclingPointRepository for PgRecyclingPointRepository {
    async fn list(&self) -> Result<Vec<RecyclingPoint>> {
        let points = sqlx::query_as::<_, RecyclingPoint>(
            r#"
            SELECT id, name, address, latitude, longitude, waste_types_accepted, opening_hours,
                   phone, website, verified, created_at, updated_at
            FROM recycling_points
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }

    async fn create(&self, req: &CreateRecyclingPointRequest) -> Result<RecyclingPoint> {
        let point = sqlx::query_as::<_, RecyclingPoint>(
            r#"
            INSERT INTO recycling_points (name, address, latitude, longitude, waste_types_accepted,
                                          opening_hours, phone, website, verified)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, address, latitude, longitude, waste_types_accepted, opening_hours,
                      phone, website, verified, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.address)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(&req.waste_types_accepted)
        .bind(&req.opening_hours)
        .bind(&req.phone)
        .bind(&req.website)
        .bind(req.verified)
        .fetch_one(&self.pool)
        .await?;

        Ok(point)
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateRecyclingPointRequest,
    ) -> Result<Option<RecyclingPoint>> {
        let point = sqlx::query_as::<_, RecyclingPoint>(
            r#"
            UPDATE recycling_points
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                waste_types_accepted = COALESCE($6, waste_types_accepted),
                opening_hours = COALESCE($7, opening_hours),
                phone = COALESCE($8, phone),
                website = COALESCE($9, website),
                verified = COALESCE($10, verified),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, address, latitude, longitude, waste_types_accepted, opening_hours,
                      phone, website, verified, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.address)
        .bind(req.latitude)
        .bind(req.longitude)
        .bind(&req.waste_types_accepted)
        .bind(&req.opening_hours)
        .bind(&req.phone)
        .bind(&req.website)
        .bind(req.verified)
        .fetch_optional(&self.pool)
        .await?;

        Ok(point)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recycling_points WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
