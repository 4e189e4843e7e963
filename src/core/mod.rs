pub mod accounts;
pub mod content;
pub mod news;

pub use crate::domain::model::{CompanyNews, ExtractedContent};
pub use crate::domain::ports::{BrokerageProvider, CrawlProvider, NewsProvider};
pub use crate::utils::error::Result;
pub use accounts::AccountService;
pub use content::ContentService;
pub use news::CompanyNewsService;
