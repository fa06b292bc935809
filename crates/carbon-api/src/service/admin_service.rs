//! 管理后台服务
//!
//! 用户管理、平台统计，以及记录与运营内容的增删改查

use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::info;
use uuid::Uuid;

use crate::dto::{
    AdminRecordQuery, AdminUserDto, AdminUserQuery, CreateBadgeRequest, CreateChallengeRequest,
    CreateRecyclingPointRequest, MessageResponse, UpdateBadgeRequest, UpdateChallengeRequest,
    UpdateRecyclingPointRequest, UpdateUserRequest,
};
use crate::error::{ApiError, Result};
use crate::models::{Badge, CarbonLog, CfcReport, Challenge, RecyclingPoint, User};
use crate::repository::{PlatformStats, Repositories};

pub struct AdminService {
    repos: Repositories,
}

/// 删除结果转换：未命中时返回 404
fn deleted(found: bool, entity: &'static str) -> Result<MessageResponse> {
    if found {
        Ok(MessageResponse::deleted(entity))
    } else {
        Err(ApiError::NotFound(entity))
    }
}

impl AdminService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    // ==================== 用户 ====================

    pub async fn list_users(&self, query: &AdminUserQuery) -> Result<Vec<AdminUserDto>> {
        let users = self.repos.users.list(query).await?;
        Ok(users.into_iter().map(AdminUserDto::from).collect())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<AdminUserDto> {
        self.repos
            .users
            .find_by_id(id)
            .await?
            .map(AdminUserDto::from)
            .ok_or(ApiError::NotFound("User"))
    }

    /// 部分更新用户，管理员不能撤销自己的管理员身份
    pub async fn update_user(
        &self,
        admin: &User,
        id: Uuid,
        changes: &UpdateUserRequest,
    ) -> Result<AdminUserDto> {
        if self.repos.users.find_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound("User"));
        }
        if id == admin.id && changes.is_admin == Some(false) {
            return Err(ApiError::CannotRemoveOwnAdmin);
        }

        let user = self
            .repos
            .users
            .update(id, changes)
            .await?
            .ok_or(ApiError::NotFound("User"))?;

        info!(admin_id = %admin.id, user_id = %id, "User updated by admin");
        Ok(user.into())
    }

    /// 软删除：仅停用账户
    pub async fn deactivate_user(&self, admin: &User, id: Uuid) -> Result<MessageResponse> {
        if self.repos.users.find_by_id(id).await?.is_none() {
            return Err(ApiError::NotFound("User"));
        }
        if id == admin.id {
            return Err(ApiError::CannotDeleteSelf);
        }

        self.repos.users.deactivate(id).await?;
        info!(admin_id = %admin.id, user_id = %id, "User deactivated by admin");

        Ok(MessageResponse::new("User deactivated successfully"))
    }

    // ==================== 统计 ====================

    pub async fn platform_stats(&self, now: DateTime<Utc>) -> Result<PlatformStats> {
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);
        self.repos.stats.platform_stats(month_start).await
    }

    // ==================== 记录 ====================

    pub async fn list_carbon_logs(&self, query: &AdminRecordQuery) -> Result<Vec<CarbonLog>> {
        self.repos
            .carbon_logs
            .list_all(query.skip, query.limit, query.user_id)
            .await
    }

    pub async fn delete_carbon_log(&self, id: Uuid) -> Result<MessageResponse> {
        deleted(self.repos.carbon_logs.delete(id).await?, "Carbon log")
    }

    pub async fn list_cfc_reports(&self, query: &AdminRecordQuery) -> Result<Vec<CfcReport>> {
        self.repos
            .cfc_reports
            .list_all(query.skip, query.limit, query.user_id)
            .await
    }

    pub async fn delete_cfc_report(&self, id: Uuid) -> Result<MessageResponse> {
        deleted(self.repos.cfc_reports.delete(id).await?, "CFC report")
    }

    // ==================== 徽章 ====================

    pub async fn list_badges(&self) -> Result<Vec<Badge>> {
        self.repos.badges.list().await
    }

    pub async fn create_badge(&self, req: &CreateBadgeRequest) -> Result<Badge> {
        let badge = self.repos.badges.create(req).await?;
        info!(badge_id = %badge.id, name = %badge.name, "Badge created");
        Ok(badge)
    }

    pub async fn update_badge(&self, id: Uuid, req: &UpdateBadgeRequest) -> Result<Badge> {
        self.repos
            .badges
            .update(id, req)
            .await?
            .ok_or(ApiError::NotFound("Badge"))
    }

    pub async fn delete_badge(&self, id: Uuid) -> Result<MessageResponse> {
        deleted(self.repos.badges.delete(id).await?, "Badge")
    }

    // ==================== 挑战 ====================

    pub async fn list_challenges(&self) -> Result<Vec<Challenge>> {
        self.repos.challenges.list().await
    }

    pub async fn create_challenge(&self, req: &CreateChallengeRequest) -> Result<Challenge> {
        let challenge = self.repos.challenges.create(req).await?;
        info!(challenge_id = %challenge.id, name = %challenge.name, "Challenge created");
        Ok(challenge)
    }

    pub async fn update_challenge(
        &self,
        id: Uuid,
        req: &UpdateChallengeRequest,
    ) -> Result<Challenge> {
        self.repos
            .challenges
            .update(id, req)
            .await?
            .ok_or(ApiError::NotFound("Challenge"))
    }

    pub async fn delete_challenge(&self, id: Uuid) -> Result<MessageResponse> {
        deleted(self.repos.challenges.delete(id).await?, "Challenge")
    }

    // ==================== 回收点 ====================

    pub async fn list_recycling_points(&self) -> Result<Vec<RecyclingPoint>> {
        self.repos.recycling_points.list().await
    }

    pub async fn create_recycling_point(
        &self,
        req: &CreateRecyclingPointRequest,
    ) -> Result<RecyclingPoint> {
        let point = self.repos.recycling_points.create(req).await?;
        info!(point_id = %point.id, name = %point.name, "Recycling point created");
        Ok(point)
    }

    pub async fn update_recycling_point(
        &self,
        id: Uuid,
        req: &UpdateRecyclingPointRequest,
    ) -> Result<RecyclingPoint> {
        self.repos
            .recycling_points
            .update(id, req)
            .await?
            .ok_or(ApiError::NotFound("Recycling point"))
    }

    pub async fn delete_recycling_point(&self, id: Uuid) -> Result<MessageResponse> {
        deleted(
            self.repos.recycling_points.delete(id).await?,
            "Recycling point",
        )
    }
}
