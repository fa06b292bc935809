//! 碳足迹追踪 API 端到端测试
//!
//! 测试覆盖完整的业务流程，包括：
//! - 注册、登录与邮箱验证
//! - 碳排放记录、积分与统计
//! - 报表、趋势与影响分析
//! - 公开计算器、游戏化与回收点
//! - 管理后台权限
//!
//! 需要运行中的 carbon-api 与 PostgreSQL，默认全部 `#[ignore]`：
//! `cargo test --test e2e -- --ignored`

pub mod data;
pub mod helpers;
pub mod setup;
pub mod suites;

pub use setup::TestEnvironment;
