//! 管理后台权限测试套件

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::setup::TestEnvironment;

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_admin_requires_authentication() {
        let env = TestEnvironment::setup().await.unwrap();

        let status = env.api.get_status("/api/v1/admin/stats").await.unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_regular_user_is_forbidden() {
        let env = TestEnvironment::setup().await.unwrap();
        let (client, _) = env.registered_user().await.unwrap();

        for path in [
            "/api/v1/admin/users",
            "/api/v1/admin/stats",
            "/api/v1/admin/carbon-logs",
            "/api/v1/admin/badges",
        ] {
            let status = client.get_status(path).await.unwrap();
            assert_eq!(status, StatusCode::FORBIDDEN, "{} 应拒绝普通用户", path);
        }
    }
}
