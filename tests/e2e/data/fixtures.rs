//! 测试数据夹具
//!
//! 使用 fake 生成不重复的用户，避免用例之间互相干扰。

use fake::Fake;
use fake::faker::name::en::Name;
use serde_json::json;

use crate::helpers::{CreateLogRequest, RegisterRequest};

pub const TEST_PASSWORD: &str = "Sup3r-Secret!";

pub struct TestUsers;

impl TestUsers {
    pub fn random() -> RegisterRequest {
        RegisterRequest {
            email: format!("e2e-{}@example.com", uuid::Uuid::new_v4().simple()),
            password: TEST_PASSWORD.to_string(),
            name: Name().fake(),
        }
    }
}

pub struct TestLogs;

impl TestLogs {
    /// 20 km 汽车出行，2 人分摊
    pub fn shared_car_trip() -> CreateLogRequest {
        CreateLogRequest {
            category: "transport".to_string(),
            activity: "car".to_string(),
            carbon_amount_kg: 0.0,
            metadata: Some(json!({ "mode": "car", "distance_km": 20, "passengers": 2 })),
        }
    }

    /// 直接给出排放量的饮食记录
    pub fn beef_meal(kg: f64) -> CreateLogRequest {
        CreateLogRequest {
            category: "diet".to_string(),
            activity: "beef".to_string(),
            carbon_amount_kg: kg,
            metadata: None,
        }
    }
}
