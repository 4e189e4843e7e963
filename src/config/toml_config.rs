use crate::domain::model::CrawlerInput;
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ALPACA_API_KEY_VAR: &str = "ALPACA_API_KEY";
pub const ALPACA_API_SECRET_VAR: &str = "ALPACA_API_SECRET";
pub const FINNHUB_API_KEY_VAR: &str = "FINNHUB_API_KEY";
pub const APIFY_API_TOKEN_VAR: &str = "APIFY_API_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub http: HttpConfig,
    pub alpaca: AlpacaConfig,
    pub finnhub: FinnhubConfig,
    pub apify: ApifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlpacaConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub funding: Option<FundingConfig>,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://broker-api.sandbox.alpaca.markets/v1".to_string(),
            api_key: None,
            api_secret: None,
            funding: None,
        }
    }
}

/// Firm account used to journal starting cash into newly created accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingConfig {
    pub firm_account_id: String,
    #[serde(default = "default_funding_amount")]
    pub amount: String,
}

fn default_funding_amount() -> String {
    "10000".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinnhubConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for FinnhubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://finnhub.io/api/v1".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApifyConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub actor_id: String,
    /// Server-side wait per request (`waitForFinish`), capped at 60 by the platform.
    pub wait_secs: u64,
    pub max_wait_secs: Option<u64>,
    pub crawl: CrawlOverrides,
}

impl Default for ApifyConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.apify.com".to_string(),
            api_token: None,
            actor_id: "aYG0l9s7dbB7j3gbS".to_string(),
            wait_secs: 60,
            max_wait_secs: None,
            crawl: CrawlOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlOverrides {
    pub crawler_type: Option<String>,
    pub max_crawl_depth: Option<u32>,
    pub max_crawl_pages: Option<u64>,
    pub max_concurrency: Option<u32>,
    pub max_results: Option<u64>,
}

impl CrawlOverrides {
    pub fn apply(&self, mut input: CrawlerInput) -> CrawlerInput {
        if let Some(crawler_type) = &self.crawler_type {
            input.crawler_type = crawler_type.clone();
        }
        if let Some(depth) = self.max_crawl_depth {
            input.max_crawl_depth = depth;
        }
        if let Some(pages) = self.max_crawl_pages {
            input.max_crawl_pages = pages;
        }
        if let Some(concurrency) = self.max_concurrency {
            input.max_concurrency = concurrency;
        }
        if let Some(results) = self.max_results {
            input.max_results = results;
        }
        input
    }
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ServiceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的憑證改由環境變數補上
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.resolve_secrets();
        Ok(config)
    }

    /// 沒有設定檔時：預設值加上環境變數中的憑證
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.resolve_secrets();
        config
    }

    /// 替換環境變數 (例如 ${API_KEY})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ServiceError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn resolve_secrets(&mut self) {
        resolve_secret(&mut self.alpaca.api_key, ALPACA_API_KEY_VAR);
        resolve_secret(&mut self.alpaca.api_secret, ALPACA_API_SECRET_VAR);
        resolve_secret(&mut self.finnhub.api_key, FINNHUB_API_KEY_VAR);
        resolve_secret(&mut self.apify.api_token, APIFY_API_TOKEN_VAR);
    }

    /// 列出尚未設定的憑證（以環境變數名稱表示）
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.alpaca.api_key.is_none() {
            missing.push(ALPACA_API_KEY_VAR);
        }
        if self.alpaca.api_secret.is_none() {
            missing.push(ALPACA_API_SECRET_VAR);
        }
        if self.finnhub.api_key.is_none() {
            missing.push(FINNHUB_API_KEY_VAR);
        }
        if self.apify.api_token.is_none() {
            missing.push(APIFY_API_TOKEN_VAR);
        }
        missing
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;

        validation::validate_url("alpaca.base_url", &self.alpaca.base_url)?;
        if let Some(funding) = &self.alpaca.funding {
            validation::validate_non_empty_string(
                "alpaca.funding.firm_account_id",
                &funding.firm_account_id,
            )?;
            validation::validate_amount("alpaca.funding.amount", &funding.amount)?;
        }

        validation::validate_url("finnhub.base_url", &self.finnhub.base_url)?;

        validation::validate_url("apify.base_url", &self.apify.base_url)?;
        validation::validate_non_empty_string("apify.actor_id", &self.apify.actor_id)?;
        validation::validate_range("apify.wait_secs", self.apify.wait_secs, 1, 60)?;
        if let Some(max_wait) = self.apify.max_wait_secs {
            validation::validate_positive_number("apify.max_wait_secs", max_wait, 1)?;
        }

        Ok(())
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

/// 空字串或未替換的 ${VAR} 視為未設定，再退回讀取環境變數
fn resolve_secret(slot: &mut Option<String>, env_var: &str) {
    let unusable = slot
        .as_deref()
        .map(|value| value.trim().is_empty() || value.starts_with("${"))
        .unwrap_or(true);

    if unusable {
        *slot = std::env::var(env_var)
            .ok()
            .filter(|value| !value.trim().is_empty());
    }
}
