// Adapters layer: reqwest implementations of the domain ports.

pub mod alpaca;
pub mod apify;
pub mod finnhub;

pub use alpaca::AlpacaBroker;
pub use apify::ApifyClient;
pub use finnhub::FinnhubClient;

use crate::utils::error::{Result, ServiceError};
use reqwest::{Client, Response};
use std::time::Duration;

pub(crate) fn build_client(timeout_seconds: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("stock-fantasy-api/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// 非 2xx 回應轉成 UpstreamError，保留原始內容
pub(crate) async fn ensure_success(provider: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = read_error_body(provider, response).await;
    tracing::warn!("⚠️ {} responded with status {}", provider, status);
    Err(ServiceError::UpstreamError {
        provider,
        status: status.as_u16(),
        body,
    })
}

/// 讀取錯誤回應內容；讀取失敗時記錄並回傳空字串
pub(crate) async fn read_error_body(provider: &'static str, response: Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!("Could not read {} error body: {}", provider, e);
            String::new()
        }
    }
}
