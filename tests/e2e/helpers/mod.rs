//! 测试辅助工具模块
//!
//! 提供 API 客户端与断言辅助。

mod api_client;
mod assertions;

pub use api_client::*;
