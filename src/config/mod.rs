pub mod toml_config;

pub use toml_config::ServiceConfig;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "stock-fantasy-api")]
#[command(about = "Stock Fantasy backend relaying brokerage, news and crawl requests")]
pub struct CliConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, env = "STOCK_FANTASY_CONFIG", help = "Path to a TOML service configuration")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 有設定檔就讀檔，否則使用預設值與環境變數
    pub fn load_service_config(&self) -> Result<ServiceConfig> {
        let config = match &self.config {
            Some(path) => {
                tracing::info!("📄 Loading service configuration from {}", path);
                ServiceConfig::from_file(path)?
            }
            None => ServiceConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        if let Some(path) = &self.config {
            validation::validate_non_empty_string("config", path)?;
        }
        Ok(())
    }
}
