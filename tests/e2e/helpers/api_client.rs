//! REST API 客户端
//!
//! 封装对 carbon-api 的 HTTP 调用。统一响应信封中的 `data` 由客户端解包。

use std::time::Duration;

use anyhow::{Result, anyhow};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// API 客户端
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// 携带 Bearer Token 的副本
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..self.clone()
        }
    }

    // ========== 健康检查 ==========

    pub async fn health(&self) -> Result<Value> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.json().await?)
    }

    // ========== 认证 API ==========

    pub async fn register(&self, req: &RegisterRequest) -> Result<TokenResponse> {
        let resp = self
            .request(self.client.post(self.url("/api/v1/auth/register")))
            .json(req)
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// OAuth2 表单登录
    pub async fn login_form(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// JSON 登录
    pub async fn login_json(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn me(&self) -> Result<UserResponse> {
        let resp = self
            .request(self.client.get(self.url("/api/v1/auth/me")))
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn resend_verification(&self) -> Result<Value> {
        self.post_data("/api/v1/auth/resend-verification", &Value::Null)
            .await
    }

    // ========== 碳排放记录 API ==========

    /// 新建记录，返回完整响应（含积分与统计）
    pub async fn create_log(&self, req: &CreateLogRequest) -> Result<Value> {
        let resp = self
            .request(self.client.post(self.url("/api/v1/carbon/logs")))
            .json(req)
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// 记录列表，返回完整响应（含分页）
    pub async fn list_logs(&self, limit: i64, offset: i64) -> Result<Value> {
        let resp = self
            .request(self.client.get(self.url("/api/v1/carbon/logs")))
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn stats(&self) -> Result<Value> {
        self.get_data("/api/v1/carbon/stats").await
    }

    pub async fn weekly_report(&self) -> Result<Value> {
        self.get_data("/api/v1/carbon/reports/weekly").await
    }

    pub async fn trends(&self, days: i64) -> Result<Value> {
        self.get_data(&format!("/api/v1/carbon/trends?days={}", days))
            .await
    }

    pub async fn impact(&self) -> Result<Value> {
        self.get_data("/api/v1/carbon/impact").await
    }

    // ========== 通用 ==========

    /// 发送 GET 请求并解包 `data`
    pub async fn get_data(&self, path: &str) -> Result<Value> {
        let resp = self.request(self.client.get(self.url(path))).send().await?;
        Self::unwrap_data(resp).await
    }

    /// 发送 POST 请求并解包 `data`
    pub async fn post_data<R: Serialize>(&self, path: &str, body: &R) -> Result<Value> {
        let resp = self
            .request(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        Self::unwrap_data(resp).await
    }

    /// 发送 GET 请求，仅返回状态码
    pub async fn get_status(&self, path: &str) -> Result<StatusCode> {
        let resp = self.request(self.client.get(self.url(path))).send().await?;
        Ok(resp.status())
    }

    // ========== 内部方法 ==========

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let error_text = resp.text().await.unwrap_or_default();
            Err(ApiFailure { status, body: error_text }.into())
        }
    }

    async fn unwrap_data(resp: Response) -> Result<Value> {
        let mut body: Value = Self::parse(resp).await?;
        body.get_mut("data")
            .map(Value::take)
            .ok_or_else(|| anyhow!("response has no data field: {}", body))
    }
}

/// 非 2xx 响应
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub body: String,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API 错误 {}: {}", self.status, self.body)
    }
}

impl std::error::Error for ApiFailure {}

// ========== 请求/响应类型 ==========

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLogRequest {
    pub category: String,
    pub activity: String,
    pub carbon_amount_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: uuid::Uuid,
    pub email: String,
    pub name: String,
    pub eco_score: f64,
    pub level: i32,
    pub total_points: i32,
    pub is_admin: bool,
    pub is_active: bool,
    pub email_verified: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}
