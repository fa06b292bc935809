//! 个人碳足迹追踪 API 服务
//!
//! 提供碳排放记录、减排建议、游戏化与回收点查询等 REST API。
//!
//! ## 核心功能
//!
//! - **账户认证**：注册、登录（JWT）、邮箱验证与重发验证邮件
//! - **碳排放记录**：按类别记录活动排放，支持根据 metadata 自动计算
//! - **统计与报表**：个人统计、周报/月报、趋势分析、影响与社区汇总
//! - **减排建议**：基于规则表的个性化建议与每日提示
//! - **CFC 上报**：制冷剂泄漏上报与影响估算
//! - **游戏化**：积分、等级、生态评分、排行榜与挑战
//! - **回收**：附近回收点查询与分类回收提示
//! - **管理后台**：用户、记录、徽章、挑战与回收点的运营管理
//!
//! ## 模块结构
//!
//! - `auth`: JWT、密码哈希与邮箱验证 Token
//! - `dto`: 请求和响应的数据传输对象
//! - `email`: 验证邮件模板与发送通道
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 认证与管理员权限中间件
//! - `models`: 数据库实体模型
//! - `repository`: 数据访问层
//! - `routes`: 路由配置
//! - `service`: 业务逻辑层
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据库：PostgreSQL (sqlx)
//! - 数据验证：validator
//! - 计算引擎：footprint-engine

pub mod auth;
pub mod dto;
pub mod email;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{ApiError, Result};
pub use state::AppState;
