//! 认证模块
//!
//! 提供 JWT Token 生成与验证、密码哈希、邮箱验证令牌

mod jwt;
mod password;
mod verification;

pub use jwt::{Claims, JwtConfig, JwtManager};
pub use password::{hash_password, verify_password};
pub use verification::{VERIFICATION_TTL_HOURS, VerificationToken, hash_token};
