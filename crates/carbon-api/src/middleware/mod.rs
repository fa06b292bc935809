//! 中间件模块
//!
//! 包含认证与管理员权限检查

pub mod admin;
pub mod auth;

pub use admin::require_admin;
pub use auth::{CurrentUser, auth_middleware};
