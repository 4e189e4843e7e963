#![allow(dead_code)]

use httpmock::MockServer;
use stock_fantasy_api::config::toml_config::FundingConfig;
use stock_fantasy_api::{router, AppState, ServiceConfig};

/// 所有供應商都指向同一個 mock server，並帶上測試憑證
pub fn config_for(server: &MockServer) -> ServiceConfig {
    let mut config = ServiceConfig::default();

    config.alpaca.base_url = server.url("/v1");
    config.alpaca.api_key = Some("test-key".to_string());
    config.alpaca.api_secret = Some("test-secret".to_string());

    config.finnhub.base_url = server.url("/api/v1");
    config.finnhub.api_key = Some("news-key".to_string());

    config.apify.base_url = server.base_url();
    config.apify.api_token = Some("apify-token".to_string());
    config.apify.wait_secs = 1;

    config
}

pub fn with_funding(mut config: ServiceConfig) -> ServiceConfig {
    config.alpaca.funding = Some(FundingConfig {
        firm_account_id: "firm-account".to_string(),
        amount: "10000".to_string(),
    });
    config
}

/// 在隨機埠啟動服務，回傳 base URL
pub async fn spawn_app(config: ServiceConfig) -> String {
    let state = AppState::from_config(&config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}
