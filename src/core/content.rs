use crate::config::toml_config::CrawlOverrides;
use crate::domain::model::{CrawlerInput, ExtractedContent, RunStatus};
use crate::domain::ports::CrawlProvider;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Keeps the string `text` field of every record, in dataset order.
pub fn collect_text(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|mut item| match item.get_mut("text").map(Value::take) {
            Some(Value::String(text)) => Some(text),
            _ => None,
        })
        .collect()
}

pub struct ContentService {
    crawler: Arc<dyn CrawlProvider>,
    overrides: CrawlOverrides,
    max_wait: Option<Duration>,
}

impl ContentService {
    pub fn new(
        crawler: Arc<dyn CrawlProvider>,
        overrides: CrawlOverrides,
        max_wait: Option<Duration>,
    ) -> Self {
        Self {
            crawler,
            overrides,
            max_wait,
        }
    }

    pub async fn extract(&self, url: &str) -> Result<ExtractedContent> {
        validation::validate_url("url", url)?;

        let input = self.overrides.apply(CrawlerInput::for_url(url));
        let started = Instant::now();

        let mut run = self.crawler.start_run(&input).await?;
        tracing::info!("🕷️ Crawl run {} started for {}", run.id, url);

        while !run.run_status().is_terminal() {
            tracing::debug!("Crawl run {} is {}, waiting", run.id, run.status);
            let Some(max_wait) = self.max_wait else {
                run = self.crawler.poll_run(&run.id).await?;
                continue;
            };

            // 單次輪詢也不能超過剩餘的等待時間
            let remaining = max_wait.saturating_sub(started.elapsed());
            let polled = if remaining.is_zero() {
                None
            } else {
                tokio::time::timeout(remaining, self.crawler.poll_run(&run.id)).await.ok()
            };
            match polled {
                Some(next) => run = next?,
                None => {
                    return Err(ServiceError::CrawlTimeout {
                        run_id: run.id,
                        waited_secs: started.elapsed().as_secs(),
                    })
                }
            }
        }

        // 失敗的 run 仍讀取已產生的資料
        if run.run_status() != RunStatus::Succeeded {
            tracing::warn!("⚠️ Crawl run {} finished with status {}", run.id, run.status);
        }

        let items = self.crawler.dataset_items(&run.default_dataset_id).await?;
        let item_count = items.len();
        let fragments = collect_text(items);

        tracing::info!(
            "✅ Crawl run {} done in {:?}: {} items, {} text fragments",
            run.id,
            started.elapsed(),
            item_count,
            fragments.len()
        );

        Ok(ExtractedContent::from(fragments))
    }
}
