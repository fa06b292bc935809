//! 业务服务层
//!
//! 编排仓储与计算引擎，handler 只负责参数提取与响应包装

pub mod admin_service;
pub mod auth_service;
pub mod carbon_service;
pub mod cfc_service;
pub mod recycling;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use carbon_service::CarbonService;
pub use cfc_service::CfcService;
