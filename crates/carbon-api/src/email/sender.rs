//! 默认邮件发送实现

use std::time::Duration;

use async_trait::async_trait;
use carbon_shared::config::EmailConfig;
use carbon_shared::observability::metrics;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::json;
use tracing::{info, warn};

use super::template::{RenderedEmail, render_verification, verification_url};
use super::{EmailOutcome, EmailSender};
use crate::error::ApiError;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const RESEND_TIMEOUT: Duration = Duration::from_secs(10);

/// 按配置选择 Resend 或 SMTP 通道
pub struct EmailService {
    config: EmailConfig,
    http: reqwest::Client,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// 是否配置了任一发送通道
    pub fn is_configured(&self) -> bool {
        self.resend_key().is_some() || self.config.smtp.is_configured()
    }

    fn resend_key(&self) -> Option<&str> {
        self.config
            .resend_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
    }

    /// "Name <email>"，名称为空时只返回邮箱
    fn from_field(&self) -> Result<String, ApiError> {
        let email = self.config.from_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::Email(format!("invalid from address: {}", email)));
        }
        let name = self.config.from_name.trim();
        if name.is_empty() {
            Ok(email.to_string())
        } else {
            Ok(format!("{} <{}>", name, email))
        }
    }

    async fn send_via_resend(
        &self,
        api_key: &str,
        to: &str,
        email: &RenderedEmail,
    ) -> Result<(), ApiError> {
        let body = json!({
            "from": self.from_field()?,
            "to": [to],
            "subject": email.subject,
            "html": email.html,
            "text": email.text,
        });

        let response = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(api_key)
            .timeout(RESEND_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Email(format!("resend request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::OK {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(ApiError::Email(format!(
            "resend returned {}: {}",
            status.as_u16(),
            detail
        )))
    }

    async fn send_via_smtp(&self, to: &str, email: &RenderedEmail) -> Result<(), ApiError> {
        let smtp = &self.config.smtp;
        let (Some(host), Some(username), Some(password)) = (
            smtp.host.as_deref(),
            smtp.username.as_deref(),
            smtp.password.as_deref(),
        ) else {
            return Err(ApiError::Email("smtp is not configured".to_string()));
        };

        let from: Mailbox = self
            .from_field()?
            .parse()
            .map_err(|e| ApiError::Email(format!("invalid from mailbox: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|e| ApiError::Email(format!("invalid recipient: {}", e)))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| ApiError::Email(format!("failed to build message: {}", e)))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| ApiError::Email(format!("smtp relay setup failed: {}", e)))?
            .port(smtp.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        mailer
            .send(message)
            .await
            .map_err(|e| ApiError::Email(format!("smtp send failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl EmailSender for EmailService {
    async fn send_verification_email(&self, to: &str, name: &str, token: &str) -> EmailOutcome {
        let url = verification_url(&self.config.frontend_url, token);
        let email = render_verification(name, &url);

        let outcome = if let Some(api_key) = self.resend_key() {
            match self.send_via_resend(api_key, to, &email).await {
                Ok(()) => {
                    info!(to = %to, "Verification email sent via Resend");
                    EmailOutcome::Resend
                }
                Err(e) => {
                    warn!(to = %to, error = %e, "Failed to send verification email via Resend");
                    EmailOutcome::Failed
                }
            }
        } else if self.config.smtp.is_configured() {
            match self.send_via_smtp(to, &email).await {
                Ok(()) => {
                    info!(to = %to, "Verification email sent via SMTP");
                    EmailOutcome::Smtp
                }
                Err(e) => {
                    warn!(to = %to, error = %e, "Failed to send verification email via SMTP");
                    EmailOutcome::Failed
                }
            }
        } else {
            warn!(
                to = %to,
                verification_url = %url,
                "Email service not configured, verification email not sent"
            );
            EmailOutcome::NotSent
        };

        metrics::record_verification_email(outcome.as_str());
        outcome
    }
}
