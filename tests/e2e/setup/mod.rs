//! 测试环境设置模块
//!
//! 读取服务地址并等待服务就绪。

use std::time::Duration;

use anyhow::{Result, bail};

use crate::helpers::ApiClient;

/// 测试环境配置
#[derive(Debug, Clone)]
pub struct TestEnvConfig {
    /// carbon-api 地址
    pub api_url: String,
    /// 等待服务就绪的超时时间
    pub service_ready_timeout: Duration,
    /// 是否跳过服务健康检查
    pub skip_health_check: bool,
}

impl Default for TestEnvConfig {
    fn default() -> Self {
        Self {
            // 使用 127.0.0.1 而非 localhost，避免 IPv6 连接问题
            api_url: std::env::var("CARBON_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".into()),
            service_ready_timeout: Duration::from_secs(30),
            skip_health_check: std::env::var("SKIP_HEALTH_CHECK")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

/// 测试环境
pub struct TestEnvironment {
    pub config: TestEnvConfig,
    pub api: ApiClient,
}

impl TestEnvironment {
    /// 使用默认配置初始化
    pub async fn setup() -> Result<Self> {
        Self::with_config(TestEnvConfig::default()).await
    }

    pub async fn with_config(config: TestEnvConfig) -> Result<Self> {
        let api = ApiClient::new(&config.api_url)?;
        let env = Self { config, api };

        if !env.config.skip_health_check {
            env.wait_until_ready().await?;
        }
        Ok(env)
    }

    /// 轮询 /health 直到数据库连通或超时
    async fn wait_until_ready(&self) -> Result<()> {
        let deadline = tokio::time::Instant::now() + self.config.service_ready_timeout;

        loop {
            if let Ok(health) = self.api.health().await {
                if health["database"] == "connected" {
                    return Ok(());
                }
            }
            if tokio::time::Instant::now() >= deadline {
                bail!(
                    "carbon-api at {} not ready within {:?}",
                    self.config.api_url,
                    self.config.service_ready_timeout
                );
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }

    /// 注册一个新用户并返回已登录的客户端
    pub async fn registered_user(&self) -> Result<(ApiClient, crate::helpers::TokenResponse)> {
        let req = crate::data::TestUsers::random();
        let token = self.api.register(&req).await?;
        Ok((self.api.with_token(&token.access_token), token))
    }
}
