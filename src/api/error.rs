use crate::utils::error::ServiceError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// HTTP-facing error. Bodies are `{"detail": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 - invalid caller input
    #[error("{0}")]
    BadRequest(String),

    /// Upstream 4xx/5xx, relayed with the same status
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// 500 - outbound request could not be completed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// 503 - provider credentials missing
    #[error("{0}")]
    Unavailable(String),

    /// 504 - crawl did not finish in time
    #[error("{0}")]
    GatewayTimeout(String),

    /// 500 - anything else
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { status, .. } => *status,
            ApiError::RequestFailed(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("❌ {} {}", status.as_u16(), self);
        } else {
            tracing::warn!("{} {}", status.as_u16(), self);
        }

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match &err {
            ServiceError::UpstreamError { status, .. } => {
                // 只轉傳錯誤狀態碼，其他非預期狀態一律視為 502
                let status = StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                ApiError::Upstream {
                    status,
                    message: err.to_string(),
                }
            }
            ServiceError::ApiError(e) => ApiError::RequestFailed(e.to_string()),
            ServiceError::MissingCredential { .. } => ApiError::Unavailable(err.to_string()),
            ServiceError::CrawlTimeout { .. } => ApiError::GatewayTimeout(err.to_string()),
            ServiceError::ValidationError { message } => ApiError::BadRequest(message.clone()),
            e if e.is_validation() => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

// 查詢參數解析失敗也回傳 {"detail": ...}
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
