use super::{build_client, join_url, read_error_body};
use crate::config::toml_config::{FinnhubConfig, HttpConfig};
use crate::domain::model::{DateRange, RawArticle};
use crate::domain::ports::NewsProvider;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

const PROVIDER: &str = "Finnhub";

pub struct FinnhubClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FinnhubClient {
    pub fn new(config: &FinnhubConfig, http: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(http.timeout_seconds)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl NewsProvider for FinnhubClient {
    async fn company_news(&self, symbol: &str, range: &DateRange) -> Result<Vec<RawArticle>> {
        let token = self.api_key.as_deref().ok_or(ServiceError::MissingCredential {
            provider: PROVIDER,
            field: "api_key",
        })?;

        let url = join_url(&self.base_url, "company-news");
        let from = range.from.format("%Y-%m-%d").to_string();
        let to = range.to.format("%Y-%m-%d").to_string();

        tracing::debug!("Making Finnhub request to: {} ({} {}..{})", url, symbol, from, to);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("token", token),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Finnhub response status: {}", status);

        // 只接受 200，其餘狀態碼連同內容回傳給呼叫端
        if status != StatusCode::OK {
            let body = read_error_body(PROVIDER, response).await;
            return Err(ServiceError::UpstreamError {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let articles: Vec<RawArticle> = serde_json::from_str(&text)?;
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;

    fn client(base_url: String) -> FinnhubClient {
        let config = FinnhubConfig {
            base_url,
            api_key: Some("news-key".to_string()),
        };
        FinnhubClient::new(&config, &HttpConfig::default()).unwrap()
    }

    fn range() -> DateRange {
        DateRange::ending_on(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), 2)
    }

    #[tokio::test]
    async fn test_company_news_query_parameters() {
        let server = MockServer::start_async().await;

        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/company-news")
                    .query_param("symbol", "MSFT")
                    .query_param("from", "2024-05-08")
                    .query_param("to", "2024-05-10")
                    .query_param("token", "news-key");
                then.status(200).json_body(serde_json::json!([
                    {"id": 1, "headline": "Cloud growth", "datetime": 1715300000, "related": "MSFT"},
                    {"id": 2, "headline": "New Surface lineup"}
                ]));
            })
            .await;

        let articles = client(server.url("/api/v1"))
            .company_news("MSFT", &range())
            .await
            .unwrap();

        api_mock.assert_async().await;
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].related.as_deref(), Some("MSFT"));
        assert_eq!(articles[1].datetime, None);
    }

    #[tokio::test]
    async fn test_non_200_becomes_upstream_error() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/company-news");
                then.status(403).body("You don't have access to this resource.");
            })
            .await;

        let result = client(server.url("/api/v1"))
            .company_news("MSFT", &range())
            .await;

        match result {
            Err(ServiceError::UpstreamError { status, body, .. }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "You don't have access to this resource.");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_serialization_error() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/company-news");
                then.status(200).json_body(serde_json::json!({"error": "unexpected"}));
            })
            .await;

        let result = client(server.url("/api/v1"))
            .company_news("MSFT", &range())
            .await;

        assert!(matches!(result, Err(ServiceError::SerializationError(_))));
    }
}
