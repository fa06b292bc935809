//! 验证邮件模板
//!
//! 同时生成 HTML 与纯文本两个版本

/// 验证邮件主题
pub const VERIFICATION_SUBJECT: &str = "Verify Your Email - Carbon Tracker";

/// 渲染后的邮件内容
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: &'static str,
    pub html: String,
    pub text: String,
}

/// 拼接前端验证链接
pub fn verification_url(frontend_url: &str, token: &str) -> String {
    format!(
        "{}/verify-email?token={}",
        frontend_url.trim_end_matches('/'),
        token
    )
}

/// 渲染验证邮件
pub fn render_verification(name: &str, url: &str) -> RenderedEmail {
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background: linear-gradient(135deg, #10b981 0%, #059669 100%); color: white; padding: 30px; text-align: center; border-radius: 10px 10px 0 0; }}
        .content {{ background: #f9fafb; padding: 30px; border-radius: 0 0 10px 10px; }}
        .button {{ display: inline-block; padding: 12px 30px; background: #10b981; color: white; text-decoration: none; border-radius: 5px; margin: 20px 0; }}
        .footer {{ text-align: center; margin-top: 20px; color: #6b7280; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🌱 Welcome to Carbon Tracker!</h1>
        </div>
        <div class="content">
            <p>Hi {name},</p>
            <p>Thank you for registering with Carbon Tracker! Please verify your email address to complete your registration.</p>
            <p style="text-align: center;">
                <a href="{url}" class="button">Verify Email Address</a>
            </p>
            <p>Or copy and paste this link into your browser:</p>
            <p style="word-break: break-all; color: #059669;">{url}</p>
            <p>This link will expire in 24 hours.</p>
            <p>If you didn't create an account, you can safely ignore this email.</p>
        </div>
        <div class="footer">
            <p>© 2024 Carbon Tracker. All rights reserved.</p>
        </div>
    </div>
</body>
</html>
"#
    );

    let text = format!(
        "Welcome to Carbon Tracker!\n\n\
         Hi {name},\n\n\
         Thank you for registering with Carbon Tracker! Please verify your email address by clicking the link below:\n\n\
         {url}\n\n\
         This link will expire in 24 hours.\n\n\
         If you didn't create an account, you can safely ignore this email.\n\n\
         © 2024 Carbon Tracker. All rights reserved.\n"
    );

    RenderedEmail {
        subject: VERIFICATION_SUBJECT,
        html,
        text,
    }
}
