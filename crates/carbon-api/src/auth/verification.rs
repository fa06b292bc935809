//! 邮箱验证令牌
//!
//! 明文令牌只出现在邮件链接中，数据库只保存其 SHA-256 摘要。

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// 验证令牌有效期（小时）
pub const VERIFICATION_TTL_HOURS: i64 = 24;

/// 新生成的验证令牌
#[derive(Debug, Clone)]
pub struct VerificationToken {
    /// 发送给用户的明文令牌
    pub token: String,
    /// 入库的摘要
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// 生成 32 字节随机令牌（base64url 编码）
    pub fn generate(now: DateTime<Utc>) -> Self {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        Self {
            token_hash: hash_token(&token),
            token,
            expires_at: now + Duration::hours(VERIFICATION_TTL_HOURS),
        }
    }
}

/// 计算令牌的 SHA-256 十六进制摘要
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
