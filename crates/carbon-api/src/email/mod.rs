//! 邮件发送
//!
//! `EmailSender` 抽象发送行为，便于服务层在测试中替换。
//! 默认实现按 Resend API、SMTP、仅记录日志的顺序选择通道。

mod sender;
pub mod template;

use async_trait::async_trait;

pub use sender::EmailService;

/// 发送结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailOutcome {
    /// 已通过 Resend 发送
    Resend,
    /// 已通过 SMTP 发送
    Smtp,
    /// 未配置任何通道，仅记录日志
    NotSent,
    /// 发送失败
    Failed,
}

impl EmailOutcome {
    pub fn is_sent(self) -> bool {
        matches!(self, Self::Resend | Self::Smtp)
    }

    /// 指标标签
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resend => "resend",
            Self::Smtp => "smtp",
            Self::NotSent => "not_sent",
            Self::Failed => "failed",
        }
    }
}

/// 邮件发送器
///
/// 发送失败不向上抛出，由调用方根据 `EmailOutcome` 决定是否提示用户
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_verification_email(&self, to: &str, name: &str, token: &str) -> EmailOutcome;
}
