use crate::config::toml_config::SourceConfig;
use crate::domain::ports::CurriculumSource;
use crate::utils::error::{CurriculumError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("curriculum-etl/", env!("CARGO_PKG_VERSION"));

/// 透過 HTTP 取得課程資料，路徑相對於 base URL
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(
            config
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: Self::normalize_base_url(&config.base_url)?,
        })
    }

    /// `Url::join` 只在結尾有斜線時保留最後一段路徑
    fn normalize_base_url(base_url: &str) -> Result<Url> {
        if base_url.ends_with('/') {
            Ok(Url::parse(base_url)?)
        } else {
            Ok(Url::parse(&format!("{}/", base_url))?)
        }
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl CurriculumSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.resolve(path)?;
        let response = self.client.get(url.clone()).send().await?;

        tracing::debug!("API response status for {}: {}", url, response.status());

        if !response.status().is_success() {
            return Err(CurriculumError::HttpStatusError {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
