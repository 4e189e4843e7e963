use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

// ---- Brokerage ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email_address: String,
    pub phone_number: String,
    pub street_address: Vec<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub given_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub tax_id_type: String,
    pub tax_id: String,
    pub country_of_citizenship: String,
    pub country_of_birth: String,
    pub country_of_tax_residence: String,
    pub funding_source: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disclosures {
    pub is_control_person: bool,
    pub is_affiliated_exchange_or_finra: bool,
    pub is_politically_exposed: bool,
    pub immediate_family_exposed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    pub agreement: String,
    pub signed_at: String,
    pub ip_address: String,
}

/// Account application in the brokerage's `POST /accounts` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountApplication {
    pub contact: Contact,
    pub identity: Identity,
    pub disclosures: Disclosures,
    pub agreements: Vec<Agreement>,
}

impl AccountApplication {
    /// Sandbox applicant used when the caller does not supply a section.
    pub fn sandbox_applicant(signed_at: &str) -> Self {
        Self {
            contact: Contact {
                email_address: "test1@gmail.com".to_string(),
                phone_number: "+17065912538".to_string(),
                street_address: vec!["123 Main Street".to_string()],
                city: "New York".to_string(),
                state: "NY".to_string(),
                postal_code: "10001".to_string(),
                country: "USA".to_string(),
            },
            identity: Identity {
                given_name: "John".to_string(),
                family_name: "Doe".to_string(),
                date_of_birth: "1990-01-01".to_string(),
                tax_id_type: "USA_SSN".to_string(),
                tax_id: "193-12-1362".to_string(),
                country_of_citizenship: "USA".to_string(),
                country_of_birth: "USA".to_string(),
                country_of_tax_residence: "USA".to_string(),
                funding_source: vec!["employment_income".to_string()],
            },
            disclosures: Disclosures {
                is_control_person: false,
                is_affiliated_exchange_or_finra: false,
                is_politically_exposed: false,
                immediate_family_exposed: false,
            },
            agreements: vec![Agreement {
                agreement: "customer_agreement".to_string(),
                signed_at: signed_at.to_string(),
                ip_address: "127.0.0.1".to_string(),
            }],
        }
    }
}

/// Sections a caller may supply; anything else in the request body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationOverrides {
    pub contact: Option<Contact>,
    pub identity: Option<Identity>,
    pub disclosures: Option<Disclosures>,
    pub agreements: Option<Vec<Agreement>>,
}

impl ApplicationOverrides {
    pub fn apply(self, mut application: AccountApplication) -> AccountApplication {
        if let Some(contact) = self.contact {
            application.contact = contact;
        }
        if let Some(identity) = self.identity {
            application.identity = identity;
        }
        if let Some(disclosures) = self.disclosures {
            application.disclosures = disclosures;
        }
        if let Some(agreements) = self.agreements {
            application.agreements = agreements;
        }
        application
    }

    pub fn is_empty(&self) -> bool {
        self.contact.is_none()
            && self.identity.is_none()
            && self.disclosures.is_none()
            && self.agreements.is_none()
    }
}

/// Cash journal between two brokerage accounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub from_account_id: String,
    pub to_account_id: String,
    pub entry_type: String,
    pub amount: String,
}

impl JournalEntry {
    pub fn cash(from_account_id: &str, to_account_id: &str, amount: &str) -> Self {
        Self {
            from_account_id: from_account_id.to_string(),
            to_account_id: to_account_id.to_string(),
            entry_type: "JNLC".to_string(),
            amount: amount.to_string(),
        }
    }
}

// ---- News ----

/// Article as returned by the news provider. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawArticle {
    pub id: Option<i64>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub datetime: Option<i64>,
    pub category: Option<String>,
    pub related: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub id: Option<i64>,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub datetime: Option<String>,
    pub category: Option<String>,
    pub related: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        // 0 或缺少時間戳記都視為沒有時間
        let datetime = raw
            .datetime
            .filter(|ts| *ts != 0)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string());

        Self {
            id: raw.id,
            headline: raw.headline,
            summary: raw.summary,
            source: raw.source,
            url: raw.url,
            image: raw.image,
            datetime,
            category: raw.category,
            related: raw.related,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn ending_on(to: NaiveDate, days_back: u32) -> Self {
        let from = to - chrono::Duration::days(i64::from(days_back));
        Self { from, to }
    }

    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyNews {
    pub symbol: String,
    pub news_count: usize,
    pub date_range: DateRange,
    pub news: Vec<Article>,
}

// ---- Crawling ----

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfiguration {
    pub use_apify_proxy: bool,
}

const REMOVE_ELEMENTS_SELECTOR: &str = "nav, footer, script, style, noscript, svg, img[src^='data:'],
        [role=\"alert\"],
        [role=\"banner\"],
        [role=\"dialog\"],
        [role=\"alertdialog\"],
        [role=\"region\"][aria-label*=\"skip\" i],
        [aria-modal=\"true\"]";

/// Input of the website content crawler actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerInput {
    pub start_urls: Vec<StartUrl>,
    pub use_sitemaps: bool,
    pub respect_robots_txt_file: bool,
    pub crawler_type: String,
    pub include_url_globs: Vec<String>,
    pub exclude_url_globs: Vec<String>,
    pub keep_url_fragments: bool,
    pub ignore_canonical_url: bool,
    pub ignore_https_errors: bool,
    pub max_crawl_depth: u32,
    pub max_crawl_pages: u64,
    pub initial_concurrency: u32,
    pub max_concurrency: u32,
    pub initial_cookies: Vec<serde_json::Value>,
    pub proxy_configuration: ProxyConfiguration,
    pub max_session_rotations: u32,
    pub max_request_retries: u32,
    pub request_timeout_secs: u32,
    #[serde(rename = "minFileDownloadSpeedKBps")]
    pub min_file_download_speed_kbps: u32,
    pub dynamic_content_wait_secs: u32,
    pub wait_for_selector: String,
    pub soft_wait_for_selector: String,
    pub max_scroll_height_pixels: u32,
    pub keep_elements_css_selector: String,
    pub remove_elements_css_selector: String,
    pub remove_cookie_warnings: bool,
    pub block_media: bool,
    pub expand_iframes: bool,
    pub click_elements_css_selector: String,
    pub html_transformer: String,
    pub readable_text_char_threshold: u32,
    pub aggressive_prune: bool,
    pub debug_mode: bool,
    pub debug_log: bool,
    pub save_html: bool,
    pub save_html_as_file: bool,
    pub save_markdown: bool,
    pub save_files: bool,
    pub save_screenshots: bool,
    pub max_results: u64,
    pub client_side_min_change_percentage: u32,
    pub rendering_type_detection_percentage: u32,
}

impl CrawlerInput {
    pub fn for_url(url: &str) -> Self {
        Self {
            start_urls: vec![StartUrl {
                url: url.to_string(),
            }],
            use_sitemaps: false,
            respect_robots_txt_file: true,
            crawler_type: "playwright:adaptive".to_string(),
            include_url_globs: Vec::new(),
            exclude_url_globs: Vec::new(),
            keep_url_fragments: false,
            ignore_canonical_url: false,
            ignore_https_errors: false,
            max_crawl_depth: 20,
            max_crawl_pages: 9_999_999,
            initial_concurrency: 0,
            max_concurrency: 200,
            initial_cookies: Vec::new(),
            proxy_configuration: ProxyConfiguration {
                use_apify_proxy: true,
            },
            max_session_rotations: 10,
            max_request_retries: 3,
            request_timeout_secs: 60,
            min_file_download_speed_kbps: 128,
            dynamic_content_wait_secs: 10,
            wait_for_selector: String::new(),
            soft_wait_for_selector: String::new(),
            max_scroll_height_pixels: 5000,
            keep_elements_css_selector: String::new(),
            remove_elements_css_selector: REMOVE_ELEMENTS_SELECTOR.to_string(),
            remove_cookie_warnings: true,
            block_media: true,
            expand_iframes: true,
            click_elements_css_selector: "[aria-expanded=\"false\"]".to_string(),
            html_transformer: "readableText".to_string(),
            readable_text_char_threshold: 100,
            aggressive_prune: false,
            debug_mode: false,
            debug_log: false,
            save_html: false,
            save_html_as_file: false,
            save_markdown: true,
            save_files: false,
            save_screenshots: false,
            max_results: 9_999_999,
            client_side_min_change_percentage: 15,
            rendering_type_detection_percentage: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    TimingOut,
    TimedOut,
    Aborting,
    Aborted,
    Unknown,
}

impl RunStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "READY" => RunStatus::Ready,
            "RUNNING" => RunStatus::Running,
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" => RunStatus::Failed,
            "TIMING-OUT" => RunStatus::TimingOut,
            "TIMED-OUT" => RunStatus::TimedOut,
            "ABORTING" => RunStatus::Aborting,
            "ABORTED" => RunStatus::Aborted,
            _ => RunStatus::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded | RunStatus::Failed | RunStatus::TimedOut | RunStatus::Aborted
        )
    }
}

/// Snapshot of a crawl job on the platform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRun {
    pub id: String,
    pub status: String,
    pub default_dataset_id: String,
}

impl CrawlRun {
    pub fn run_status(&self) -> RunStatus {
        RunStatus::parse(&self.status)
    }
}

/// Text extracted by a crawl: a bare string for one fragment, a list otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedContent {
    Single(String),
    Many(Vec<String>),
}

impl From<Vec<String>> for ExtractedContent {
    fn from(mut fragments: Vec<String>) -> Self {
        if fragments.len() == 1 {
            ExtractedContent::Single(fragments.remove(0))
        } else {
            ExtractedContent::Many(fragments)
        }
    }
}
