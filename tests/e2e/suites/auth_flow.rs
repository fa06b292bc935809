//! 认证流程测试套件
//!
//! 注册、登录（表单与 JSON）、当前用户与重发验证邮件。

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::data::*;
    use crate::setup::TestEnvironment;

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_register_then_login() {
        let env = TestEnvironment::setup().await.unwrap();
        let req = TestUsers::random();

        let registered = env.api.register(&req).await.unwrap();
        assert_eq!(registered.token_type, "bearer");
        assert_eq!(registered.user.email, req.email);
        assert_eq!(registered.user.level, 1);
        assert_eq!(registered.user.total_points, 0);
        assert!(!registered.user.email_verified);

        let via_form = env.api.login_form(&req.email, TEST_PASSWORD).await.unwrap();
        assert_eq!(via_form.user.id, registered.user.id);

        let via_json = env.api.login_json(&req.email, TEST_PASSWORD).await.unwrap();
        assert_eq!(via_json.user.id, registered.user.id);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_duplicate_registration_is_rejected() {
        let env = TestEnvironment::setup().await.unwrap();
        let req = TestUsers::random();

        env.api.register(&req).await.unwrap();
        crate::assert_api_status!(env.api.register(&req).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_wrong_password_is_unauthorized() {
        let env = TestEnvironment::setup().await.unwrap();
        let req = TestUsers::random();
        env.api.register(&req).await.unwrap();

        crate::assert_api_status!(
            env.api.login_form(&req.email, "wrong-password").await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_me_requires_token() {
        let env = TestEnvironment::setup().await.unwrap();

        let status = env.api.get_status("/api/v1/auth/me").await.unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (client, token) = env.registered_user().await.unwrap();
        let me = client.me().await.unwrap();
        assert_eq!(me.id, token.user.id);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_resend_verification_reports_delivery() {
        let env = TestEnvironment::setup().await.unwrap();
        let (client, _) = env.registered_user().await.unwrap();

        let result = client.resend_verification().await.unwrap();
        assert!(result["email_sent"].is_boolean());
        assert!(result["message"].is_string());
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_unknown_verification_token() {
        let env = TestEnvironment::setup().await.unwrap();

        let status = env
            .api
            .get_status("/api/v1/auth/verify-email?token=does-not-exist")
            .await
            .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
