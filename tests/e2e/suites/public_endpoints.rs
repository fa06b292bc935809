//! 公开端点测试套件
//!
//! 计算器、每日提示、游戏化与回收点无需登录。

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::setup::TestEnvironment;

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_health() {
        let env = TestEnvironment::setup().await.unwrap();

        let health = env.api.health().await.unwrap();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["service"], "carbon-tracker-api");
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_calculators() {
        let env = TestEnvironment::setup().await.unwrap();

        let calc = env
            .api
            .post_data(
                "/api/v1/carbon/calculate",
                &json!({ "category": "transport", "activity": "car", "amount": 10 }),
            )
            .await
            .unwrap();
        assert_eq!(calc["category"], "transport");

        let cfc = env
            .api
            .post_data(
                "/api/v1/cfc/calculate",
                &json!({ "device": "AC", "issue_type": "Gas leak", "refrigerant_type": "HCFC-22" }),
            )
            .await
            .unwrap();
        assert!(cfc["co2_equivalent_kg"].as_f64().is_some_and(|v| v > 0.0));
        assert!(cfc["cfc_released_kg"].is_number());
        assert!(cfc["ozone_depletion"].is_number());

        let defaults = env
            .api
            .get_data("/api/v1/cfc/device-defaults/Refrigerator")
            .await
            .unwrap();
        assert_eq!(defaults["typical_refrigerant"], "CFC-12");

        let issues = env.api.get_data("/api/v1/cfc/issue-types").await.unwrap();
        assert!(issues.as_array().is_some_and(|i| i.len() == 9));

        let factors = env.api.get_data("/api/v1/carbon/factors").await.unwrap();
        assert!(factors["transport"]["car"].is_number());
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_gamification() {
        let env = TestEnvironment::setup().await.unwrap();

        let tip = env
            .api
            .get_data("/api/v1/carbon/suggestions/daily-tip")
            .await
            .unwrap();
        assert!(tip["tip"].is_string());

        let leaderboard = env
            .api
            .get_data("/api/v1/gamification/leaderboard?limit=5")
            .await
            .unwrap();
        let entries = leaderboard.as_array().unwrap();
        assert!(entries.len() <= 5);
        if let Some(first) = entries.first() {
            assert_eq!(first["rank"], 1);
        }

        let challenges = env
            .api
            .get_data("/api/v1/gamification/challenges")
            .await
            .unwrap();
        assert!(!challenges.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "需要运行服务"]
    async fn test_recycling() {
        let env = TestEnvironment::setup().await.unwrap();

        let points = env
            .api
            .get_data("/api/v1/recycling/points?latitude=23.81&longitude=90.41&radius_km=5")
            .await
            .unwrap();
        for p in points.as_array().unwrap() {
            assert!(p["distance_km"].as_f64().is_some_and(|d| d <= 5.0));
        }

        let tips = env
            .api
            .get_data("/api/v1/recycling/tips/glass")
            .await
            .unwrap();
        assert_eq!(tips["tips"].as_array().map(Vec::len), Some(4));
    }
}
