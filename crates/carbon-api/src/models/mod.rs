//! 数据库实体模型
//!
//! 与 migrations/ 中的表一一对应

pub mod carbon_log;
pub mod content;
pub mod user;

pub use carbon_log::{CarbonLog, CfcReport, NewCarbonLog};
pub use content::{Badge, Challenge, RecyclingPoint};
pub use user::{NewUser, User};
