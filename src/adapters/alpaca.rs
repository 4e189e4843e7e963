use super::{build_client, join_url};
use crate::config::toml_config::{AlpacaConfig, HttpConfig};
use crate::domain::model::{AccountApplication, JournalEntry};
use crate::domain::ports::BrokerageProvider;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

const PROVIDER: &str = "Alpaca";

/// Alpaca Broker API client (sandbox by default), HTTP Basic auth.
pub struct AlpacaBroker {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    api_secret: Option<String>,
}

impl AlpacaBroker {
    pub fn new(config: &AlpacaConfig, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(http.timeout_seconds)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        let key = self.api_key.as_deref().ok_or(ServiceError::MissingCredential {
            provider: PROVIDER,
            field: "api_key",
        })?;
        let secret = self
            .api_secret
            .as_deref()
            .ok_or(ServiceError::MissingCredential {
                provider: PROVIDER,
                field: "api_secret",
            })?;
        Ok((key, secret))
    }

    /// POST 並原樣回傳 JSON，不檢查 HTTP 狀態碼
    async fn post_json<T: Serialize + Sync>(&self, path: &str, payload: &T) -> Result<serde_json::Value> {
        let (key, secret) = self.credentials()?;
        let url = join_url(&self.base_url, path);

        tracing::debug!("Making Alpaca request to: {}", url);
        let response = self
            .client
            .post(&url)
            .basic_auth(key, Some(secret))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Alpaca response status: {}", status);
        if !status.is_success() {
            tracing::warn!("⚠️ Alpaca {} returned {}, relaying body as-is", path, status);
        }

        let text = response.text().await?;
        let body = serde_json::from_str(&text)?;
        Ok(body)
    }
}

#[async_trait]
impl BrokerageProvider for AlpacaBroker {
    async fn create_account(&self, application: &AccountApplication) -> Result<serde_json::Value> {
        self.post_json("accounts", application).await
    }

    async fn create_journal(&self, journal: &JournalEntry) -> Result<serde_json::Value> {
        self.post_json("journals", journal).await
    }
}
