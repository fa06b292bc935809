//! HTTP 请求处理器模块
//!
//! 包含所有 REST API 端点的处理器实现

pub mod admin;
pub mod auth;
pub mod carbon;
pub mod cfc;
pub mod gamification;
pub mod health;
pub mod recycling;
