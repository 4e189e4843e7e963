use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{provider} credentials are not configured ({field})")]
    MissingCredential {
        provider: &'static str,
        field: &'static str,
    },

    #[error("{provider} API error: {body}")]
    UpstreamError {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Crawl run {run_id} did not finish within {waited_secs}s")]
    CrawlTimeout { run_id: String, waited_secs: u64 },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl ServiceError {
    /// 是否為呼叫端輸入或設定值的問題
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::ValidationError { .. } | ServiceError::InvalidConfigValueError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
