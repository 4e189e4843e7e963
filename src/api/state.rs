use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{AlpacaBroker, ApifyClient, FinnhubClient};
use crate::config::ServiceConfig;
use crate::core::{
    AccountService, BrokerageProvider, CompanyNewsService, ContentService, CrawlProvider,
    NewsProvider,
};
use crate::utils::error::Result;

/// Shared state for all handlers. Everything inside is read-only.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub news: Arc<CompanyNewsService>,
    pub content: Arc<ContentService>,
}

impl AppState {
    /// Wires the HTTP adapters described by the configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let brokerage = Arc::new(AlpacaBroker::new(&config.alpaca, &config.http)?);
        let news = Arc::new(FinnhubClient::new(&config.finnhub, &config.http)?);
        let crawler = Arc::new(ApifyClient::new(&config.apify, &config.http)?);

        Ok(Self::with_providers(brokerage, news, crawler, config))
    }

    pub fn with_providers(
        brokerage: Arc<dyn BrokerageProvider>,
        news: Arc<dyn NewsProvider>,
        crawler: Arc<dyn CrawlProvider>,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(brokerage, config.alpaca.funding.clone())),
            news: Arc::new(CompanyNewsService::new(news)),
            content: Arc::new(ContentService::new(
                crawler,
                config.apify.crawl.clone(),
                config.apify.max_wait_secs.map(Duration::from_secs),
            )),
        }
    }
}
