//! 测试套件模块
//!
//! 按业务功能组织的测试用例集合。

pub mod admin_access;
pub mod auth_flow;
pub mod carbon_logging;
pub mod public_endpoints;
