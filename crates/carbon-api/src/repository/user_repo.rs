//! 用户仓储
//!
//! 提供注册、认证、游戏化统计、邮箱验证与管理后台的数据访问

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::UserRepository;
use crate::dto::{AdminUserQuery, UpdateUserRequest};
use crate::error::{ApiError, Result};
use crate::models::{NewUser, User};

macro_rules! user_columns {
    () => {
        "id, email, name, hashed_password, avatar_url, eco_score, level, total_points, \
         is_admin, is_active, email_verified, verification_token, verification_token_expires, \
         created_at, updated_at"
    };
}

/// 用户仓储
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(concat!(
            r#"
            INSERT INTO users (email, name, hashed_password, eco_score, level, total_points,
                               verification_token, verification_token_expires)
            VALUES ($1, $2, $3, 0, 1, 0, $4, $5)
            RETURNING "#,
            user_columns!()
        ))
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.hashed_password)
        .bind(&user.verification_token)
        .bind(user.verification_token_expires)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::from_unique_violation(e, "Email already registered"))?;

        Ok(created)
    }

    async fn leaderboard(&self, limit: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users ORDER BY total_points DESC, eco_score DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn set_verification_token(
        &self,
        id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET verification_token = $2, verification_token_expires = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_verification_token(&self, token_hash: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM users WHERE verification_token = $1"
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn mark_verified(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email_verified = TRUE, verification_token = NULL,
                verification_token_expires = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, query: &AdminUserQuery) -> Result<Vec<User>> {
        let pattern = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let users = sqlx::query_as::<_, User>(concat!(
            "SELECT ",
            user_columns!(),
            r#"
            FROM users
            WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)
              AND ($2::bool IS NULL OR is_admin = $2)
              AND ($3::bool IS NULL OR is_active = $3)
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#
        ))
        .bind(pattern)
        .bind(query.is_admin)
        .bind(query.is_active)
        .bind(query.skip)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update(&self, id: Uuid, changes: &UpdateUserRequest) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(concat!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                is_admin = COALESCE($4, is_admin),
                is_active = COALESCE($5, is_active),
                eco_score = COALESCE($6, eco_score),
                level = COALESCE($7, level),
                total_points = COALESCE($8, total_points),
                updated_at = NOW()
            WHERE id = $1
            RETURNING "#,
            user_columns!()
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(changes.is_admin)
        .bind(changes.is_active)
        .bind(changes.eco_score)
        .bind(changes.level)
        .bind(changes.total_points)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::from_unique_violation(e, "Email already registered"))?;

        Ok(user)
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
