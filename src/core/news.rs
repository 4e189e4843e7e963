use crate::domain::model::{Article, CompanyNews, DateRange};
use crate::domain::ports::NewsProvider;
use crate::utils::error::Result;
use crate::utils::validation;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

pub const MAX_ARTICLES: usize = 10;
pub const DEFAULT_DAYS_BACK: i64 = 2;
pub const MAX_DAYS_BACK: i64 = 365;

/// Company news lookup: date range, upstream query, top-ten reshaping.
pub struct CompanyNewsService {
    provider: Arc<dyn NewsProvider>,
}

impl CompanyNewsService {
    pub fn new(provider: Arc<dyn NewsProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch(&self, symbol: &str, days_back: Option<i64>) -> Result<CompanyNews> {
        self.fetch_ending_on(symbol, days_back, Local::now().date_naive())
            .await
    }

    pub async fn fetch_ending_on(
        &self,
        symbol: &str,
        days_back: Option<i64>,
        today: NaiveDate,
    ) -> Result<CompanyNews> {
        validation::validate_non_empty_string("symbol", symbol)?;
        let days_back = days_back.unwrap_or(DEFAULT_DAYS_BACK);
        validation::validate_range("days_back", days_back, 0, MAX_DAYS_BACK)?;

        let symbol = symbol.trim().to_uppercase();
        let range = DateRange::ending_on(today, days_back as u32);

        let articles = self.provider.company_news(&symbol, &range).await?;
        let received = articles.len();

        // 上游依時間由新到舊排序，只保留前十則
        let news: Vec<Article> = articles
            .into_iter()
            .take(MAX_ARTICLES)
            .map(Article::from)
            .collect();

        tracing::info!(
            "📰 {}: {} articles received, {} returned ({}..{})",
            symbol,
            received,
            news.len(),
            range.from,
            range.to
        );

        Ok(CompanyNews {
            symbol,
            news_count: news.len(),
            date_range: range,
            news,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawArticle;
    use crate::utils::error::ServiceError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockNewsProvider {
        articles: usize,
        requests: Mutex<Vec<(String, DateRange)>>,
    }

    impl MockNewsProvider {
        fn with_articles(articles: usize) -> Arc<Self> {
            Arc::new(Self {
                articles,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl NewsProvider for MockNewsProvider {
        async fn company_news(&self, symbol: &str, range: &DateRange) -> Result<Vec<RawArticle>> {
            self.requests
                .lock()
                .unwrap()
                .push((symbol.to_string(), *range));

            Ok((0..self.articles)
                .map(|i| RawArticle {
                    id: Some(i as i64),
                    headline: Some(format!("Headline {}", i)),
                    datetime: Some(1_700_000_000 - i as i64 * 60),
                    ..Default::default()
                })
                .collect())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_truncates_to_ten_articles() {
        let provider = MockNewsProvider::with_articles(25);
        let service = CompanyNewsService::new(provider.clone());

        let news = service
            .fetch_ending_on("aapl", None, today())
            .await
            .unwrap();

        assert_eq!(news.symbol, "AAPL");
        assert_eq!(news.news_count, 10);
        assert_eq!(news.news.len(), 10);
        assert_eq!(news.news[0].id, Some(0));
        assert_eq!(news.news[9].id, Some(9));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].0, "AAPL");
    }

    #[tokio::test]
    async fn test_default_range_is_two_days() {
        let provider = MockNewsProvider::with_articles(1);
        let service = CompanyNewsService::new(provider);

        let news = service
            .fetch_ending_on("TSLA", None, today())
            .await
            .unwrap();

        assert_eq!(news.date_range.days(), 2);
        assert_eq!(news.date_range.from, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(news.date_range.to, today());
    }

    #[tokio::test]
    async fn test_custom_days_back() {
        let provider = MockNewsProvider::with_articles(3);
        let service = CompanyNewsService::new(provider);

        let news = service
            .fetch_ending_on("TSLA", Some(7), today())
            .await
            .unwrap();

        assert_eq!(news.date_range.days(), 7);
        assert_eq!(news.news_count, 3);
    }

    #[tokio::test]
    async fn test_zero_articles() {
        let provider = MockNewsProvider::with_articles(0);
        let service = CompanyNewsService::new(provider);

        let news = service
            .fetch_ending_on("MSFT", Some(0), today())
            .await
            .unwrap();

        assert_eq!(news.news_count, 0);
        assert!(news.news.is_empty());
        assert_eq!(news.date_range.days(), 0);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_provider() {
        let provider = MockNewsProvider::with_articles(1);
        let service = CompanyNewsService::new(provider.clone());

        let blank = service.fetch_ending_on("  ", None, today()).await;
        assert!(matches!(blank, Err(ref e) if e.is_validation()));

        let negative = service.fetch_ending_on("AAPL", Some(-1), today()).await;
        assert!(matches!(
            negative,
            Err(ServiceError::InvalidConfigValueError { .. })
        ));

        assert!(provider.requests.lock().unwrap().is_empty());
    }
}
