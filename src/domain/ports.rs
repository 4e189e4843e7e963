use crate::domain::model::{
    AccountApplication, CrawlRun, CrawlerInput, DateRange, JournalEntry, RawArticle,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Brokerage sandbox used to open simulated trading accounts.
#[async_trait]
pub trait BrokerageProvider: Send + Sync {
    /// Submits the application and returns the provider's JSON body as-is,
    /// whatever the HTTP status was.
    async fn create_account(&self, application: &AccountApplication) -> Result<serde_json::Value>;

    async fn create_journal(&self, journal: &JournalEntry) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn company_news(&self, symbol: &str, range: &DateRange) -> Result<Vec<RawArticle>>;
}

/// Job-based crawl platform.
#[async_trait]
pub trait CrawlProvider: Send + Sync {
    async fn start_run(&self, input: &CrawlerInput) -> Result<CrawlRun>;

    /// Waits on the platform side for up to its poll window and returns the
    /// latest snapshot of the run.
    async fn poll_run(&self, run_id: &str) -> Result<CrawlRun>;

    async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>>;
}
