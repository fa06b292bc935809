//! 碳排放记录测试套件
//!
//! 新建记录后积分、等级、统计与报表应保持一致。

#[cfg(test)]
mod tests {
    use crate::data::*;
    use crate::setup::TestEnvironment;

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_log_is_auto_calculated_from_metadata() {
        let env = TestEnvironment::setup().await.unwrap();
        let (client, _) = env.registered_user().await.unwrap();

        let created = client.create_log(&TestLogs::shared_car_trip()).await.unwrap();

        assert_eq!(created["success"], true);
        let kg = created["data"]["carbon_amount_kg"].as_f64().unwrap();
        assert!((kg - 1.71).abs() < 1e-9, "20 km / 2 人应为 1.71 kg，实际 {}", kg);
        assert_eq!(created["points_awarded"], 25);
        assert_eq!(created["user_stats"]["total_points"], 25);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_points_accumulate_and_update_profile() {
        let env = TestEnvironment::setup().await.unwrap();
        let (client, _) = env.registered_user().await.unwrap();

        let first = client.create_log(&TestLogs::shared_car_trip()).await.unwrap();
        let second = client.create_log(&TestLogs::beef_meal(27.0)).await.unwrap();

        let total = first["points_awarded"].as_i64().unwrap()
            + second["points_awarded"].as_i64().unwrap();
        let me = client.me().await.unwrap();
        assert_eq!(i64::from(me.total_points), total);
        assert!(me.level >= 1);
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_list_and_stats() {
        let env = TestEnvironment::setup().await.unwrap();
        let (client, _) = env.registered_user().await.unwrap();

        client.create_log(&TestLogs::beef_meal(10.0)).await.unwrap();
        client.create_log(&TestLogs::beef_meal(5.5)).await.unwrap();

        let page = client.list_logs(1, 0).await.unwrap();
        assert_eq!(page["pagination"]["total"], 2);
        assert_eq!(page["data"].as_array().map(Vec::len), Some(1));

        let stats = client.stats().await.unwrap();
        assert_eq!(stats["total_kg"].as_f64(), Some(15.5));
        assert_eq!(stats["by_category"]["diet"].as_f64(), Some(15.5));
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_reports_and_impact() {
        let env = TestEnvironment::setup().await.unwrap();
        let (client, _) = env.registered_user().await.unwrap();
        client.create_log(&TestLogs::beef_meal(12.0)).await.unwrap();

        let weekly = client.weekly_report().await.unwrap();
        assert!(weekly.is_object());

        let trends = client.trends(30).await.unwrap();
        assert!(trends.is_object());

        let impact = client.impact().await.unwrap();
        assert!(impact.is_object());
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_invalid_days_window_is_rejected() {
        let env = TestEnvironment::setup().await.unwrap();
        let (client, _) = env.registered_user().await.unwrap();

        let status = client
            .get_status("/api/v1/carbon/trends?days=0")
            .await
            .unwrap();
        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    }
}
