//! 碳足迹计算引擎
//!
//! 纯函数计算层，不依赖数据库与网络：
//! - 排放因子查表与活动碳排放计算
//! - CFC（制冷剂）泄漏影响估算
//! - 积分、等级与生态评分
//! - 周报/月报与趋势分析
//! - 现实等价物换算与影响故事
//! - 基于规则表的减排建议
//!
//! 所有与时间相关的函数显式接收 `now`，便于测试与复现。

pub mod calculator;
pub mod cfc;
pub mod error;
pub mod gamification;
pub mod impact;
pub mod models;
pub mod report;
pub mod rounding;
pub mod suggestion;

pub use calculator::{CalcOptions, Calculation, calculate, calculate_from_metadata};
pub use cfc::{CfcImpact, CfcInput, DeviceDefaults, ImpactLevel, calculate_cfc_impact};
pub use error::{EngineError, Result, check_days};
pub use gamification::{UserStats, award_points_for_log, calculate_eco_score, calculate_level};
pub use impact::{CommunityImpact, Equivalents, ImpactStory, UserImpact};
pub use models::{Category, LogEntry, days_after, days_before};
pub use report::{MonthlyReport, Trend, TrendAnalysis, WeeklyReport};
pub use rounding::round_to;
pub use suggestion::{GeneratedSuggestions, Suggestion, SuggestionImpact, UserSuggestions};
