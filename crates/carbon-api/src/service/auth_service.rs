//! 认证服务
//!
//! 注册、登录、邮箱验证，以及根据 Bearer Token 解析当前用户

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::auth::{JwtManager, VerificationToken, hash_password, hash_token, verify_password};
use crate::dto::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse, VerificationSentResponse};
use crate::email::EmailSender;
use crate::error::{ApiError, Result};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

const INVALID_CREDENTIALS: &str = "Could not validate credentials";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtManager>,
    email: Arc<dyn EmailSender>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt: Arc<JwtManager>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self { users, jwt, email }
    }

    /// 注册新用户并签发 Token
    ///
    /// 验证邮件发送失败只记录日志，不影响注册结果
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register(&self, req: &RegisterRequest, now: DateTime<Utc>) -> Result<TokenResponse> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(ApiError::EmailAlreadyRegistered);
        }

        let hashed_password = hash_password(&req.password)?;
        let verification = VerificationToken::generate(now);

        let user = self
            .users
            .create(NewUser {
                email: req.email.clone(),
                name: req.name.clone(),
                hashed_password,
                verification_token: verification.token_hash.clone(),
                verification_token_expires: verification.expires_at,
            })
            .await
            .map_err(|e| match e {
                ApiError::Conflict(_) => ApiError::EmailAlreadyRegistered,
                other => other,
            })?;

        info!(user_id = %user.id, "User registered");

        let outcome = self
            .email
            .send_verification_email(&user.email, &user.name, &verification.token)
            .await;
        if !outcome.is_sent() {
            warn!(user_id = %user.id, outcome = outcome.as_str(), "Verification email was not delivered");
        }

        let (token, _) = self.jwt.generate_token(&user.email)?;
        Ok(TokenResponse::bearer(token, &user))
    }

    /// 邮箱密码登录
    #[instrument(skip(self, req))]
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse> {
        let email = req.identifier().ok_or(ApiError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&req.password, &user.hashed_password) {
            return Err(ApiError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(ApiError::InactiveUser);
        }

        let (token, _) = self.jwt.generate_token(&user.email)?;
        info!(user_id = %user.id, "User logged in");

        Ok(TokenResponse::bearer(token, &user))
    }

    /// 解析 Bearer Token 对应的活跃用户
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.jwt.verify_token(token)?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !user.is_active {
            return Err(ApiError::InactiveUser);
        }
        Ok(user)
    }

    /// 校验邮箱验证链接中的 token
    pub async fn verify_email(&self, token: &str, now: DateTime<Utc>) -> Result<MessageResponse> {
        let user = self
            .users
            .find_by_verification_token(&hash_token(token))
            .await?
            .ok_or(ApiError::InvalidVerificationToken)?;

        if user.email_verified {
            return Err(ApiError::EmailAlreadyVerified);
        }
        if user
            .verification_token_expires
            .is_some_and(|expires| expires < now)
        {
            return Err(ApiError::VerificationTokenExpired);
        }

        self.users.mark_verified(user.id).await?;
        info!(user_id = %user.id, "Email verified");

        Ok(MessageResponse::new("Email verified successfully"))
    }

    /// 轮换验证 token 并重新发送
    pub async fn resend_verification(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<VerificationSentResponse> {
        if user.email_verified {
            return Err(ApiError::EmailAlreadyVerified);
        }

        let verification = VerificationToken::generate(now);
        self.users
            .set_verification_token(user.id, verification.token_hash, verification.expires_at)
            .await?;

        let outcome = self
            .email
            .send_verification_email(&user.email, &user.name, &verification.token)
            .await;

        Ok(VerificationSentResponse {
            message: if outcome.is_sent() {
                "Verification email sent"
            } else {
                "Verification email could not be sent"
            },
            email_sent: outcome.is_sent(),
        })
    }
}
