//! 应用状态定义
//!
//! 包含 Axum 路由共享的仓储与服务

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{JwtConfig, JwtManager};
use crate::email::EmailSender;
use crate::repository::Repositories;
use crate::service::{AdminService, AuthService, CarbonService, CfcService};

/// Axum 应用共享状态
///
/// 服务与仓储均通过 Arc 共享，克隆开销只是引用计数
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub auth: Arc<AuthService>,
    pub carbon: Arc<CarbonService>,
    pub cfc: Arc<CfcService>,
    pub admin: Arc<AdminService>,
}

impl AppState {
    pub fn new(repos: Repositories, jwt_manager: JwtManager, email: Arc<dyn EmailSender>) -> Self {
        let auth = AuthService::new(repos.users.clone(), Arc::new(jwt_manager), email);
        let carbon = CarbonService::new(repos.carbon_logs.clone());
        let cfc = CfcService::new(repos.cfc_reports.clone());
        let admin = AdminService::new(repos.clone());

        Self {
            repos,
            auth: Arc::new(auth),
            carbon: Arc::new(carbon),
            cfc: Arc::new(cfc),
            admin: Arc::new(admin),
        }
    }

    /// 使用 PostgreSQL 仓储创建状态
    pub fn from_pool(pool: PgPool, jwt_config: JwtConfig, email: Arc<dyn EmailSender>) -> Self {
        Self::new(
            Repositories::from_pool(pool),
            JwtManager::new(jwt_config),
            email,
        )
    }
}
