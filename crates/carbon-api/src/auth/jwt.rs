//! JWT Token 处理
//!
//! HS256 签名，`sub` 为用户邮箱

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 签名密钥
    pub secret: String,
    /// Token 过期时间（秒）
    pub expires_in_secs: i64,
    /// Token 签发者
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: carbon_shared::config::DEV_JWT_SECRET.to_string(),
            expires_in_secs: 7 * 24 * 3600,
            issuer: "carbon-tracker-api".to_string(),
        }
    }
}

impl From<&carbon_shared::config::AuthConfig> for JwtConfig {
    fn from(auth: &carbon_shared::config::AuthConfig) -> Self {
        Self {
            secret: auth.jwt_secret.clone().unwrap_or_default(),
            expires_in_secs: auth.jwt_expires_in_secs,
            issuer: auth.issuer.clone(),
        }
    }
}

/// JWT Claims（Token 载荷）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户邮箱
    pub sub: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为指定邮箱签发 Token，返回 (token, 过期时间戳)
    pub fn generate_token(&self, email: &str) -> Result<(String, i64), ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.expires_in_secs);

        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("JWT encoding failed: {}", e)))?;

        Ok((token, exp.timestamp()))
    }

    /// 验证并解析 Token
    ///
    /// 任何失败都对外表现为 "Could not validate credentials"，具体原因只记录日志
    pub fn verify_token(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    tracing::debug!("Rejected expired token");
                }
                kind => {
                    tracing::debug!(?kind, "Rejected invalid token");
                }
            }
            ApiError::Unauthorized("Could not validate credentials".to_string())
        })?;

        Ok(token_data.claims)
    }

    pub fn expires_in_secs(&self) -> i64 {
        self.config.expires_in_secs
    }
}
