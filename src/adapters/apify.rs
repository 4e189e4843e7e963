use super::{build_client, ensure_success, join_url};
use crate::config::toml_config::{ApifyConfig, HttpConfig};
use crate::domain::model::{CrawlRun, CrawlerInput};
use crate::domain::ports::CrawlProvider;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const PROVIDER: &str = "Apify";
const DATASET_PAGE_SIZE: usize = 1000;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Apify actor runs and datasets over the v2 REST API.
pub struct ApifyClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    actor_id: String,
    wait_secs: u64,
}

impl ApifyClient {
    pub fn new(config: &ApifyConfig, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            // 每次請求都可能在伺服器端等待 wait_secs
            client: build_client(http.timeout_seconds + config.wait_secs)?,
            base_url: config.base_url.clone(),
            api_token: config.api_token.clone(),
            // "username/actor-name" 在 URL 中要寫成 "username~actor-name"
            actor_id: config.actor_id.replace('/', "~"),
            wait_secs: config.wait_secs,
        })
    }

    fn token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or(ServiceError::MissingCredential {
            provider: PROVIDER,
            field: "api_token",
        })
    }
}

#[async_trait]
impl CrawlProvider for ApifyClient {
    async fn start_run(&self, input: &CrawlerInput) -> Result<CrawlRun> {
        let token = self.token()?;
        let url = join_url(&self.base_url, &format!("v2/acts/{}/runs", self.actor_id));

        tracing::debug!("Starting Apify actor run: {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[("waitForFinish", self.wait_secs)])
            .json(input)
            .send()
            .await?;
        let response = ensure_success(PROVIDER, response).await?;

        let envelope: Envelope<CrawlRun> = serde_json::from_str(&response.text().await?)?;
        Ok(envelope.data)
    }

    async fn poll_run(&self, run_id: &str) -> Result<CrawlRun> {
        let token = self.token()?;
        let url = join_url(&self.base_url, &format!("v2/actor-runs/{}", run_id));

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("waitForFinish", self.wait_secs)])
            .send()
            .await?;
        let response = ensure_success(PROVIDER, response).await?;

        let envelope: Envelope<CrawlRun> = serde_json::from_str(&response.text().await?)?;
        Ok(envelope.data)
    }

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>> {
        let token = self.token()?;
        let url = join_url(&self.base_url, &format!("v2/datasets/{}/items", dataset_id));
        let mut items = Vec::new();

        // 以 offset/limit 分頁，直到拿到不滿一頁為止
        loop {
            let response = self
                .client
                .get(&url)
                .bearer_auth(token)
                .query(&[
                    ("format", "json".to_string()),
                    ("offset", items.len().to_string()),
                    ("limit", DATASET_PAGE_SIZE.to_string()),
                ])
                .send()
                .await?;
            let response = ensure_success(PROVIDER, response).await?;

            let page: Vec<serde_json::Value> = serde_json::from_str(&response.text().await?)?;
            let page_len = page.len();
            items.extend(page);

            tracing::debug!("📥 Dataset {}: fetched {} items so far", dataset_id, items.len());
            if page_len < DATASET_PAGE_SIZE {
                break;
            }
        }

        Ok(items)
    }
}
