use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;

use super::dto::*;
use super::error::ApiError;
use super::state::AppState;
use crate::domain::model::CompanyNews;

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from Stock Fantasy App API!",
    })
}

/// GET /test
pub async fn test_get() -> Json<TestResponse> {
    Json(TestResponse {
        status: "success",
        data: "API is working correctly",
    })
}

/// POST /test
pub async fn test_post() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "POST request received successfully",
    })
}

/// POST /create_alpaca_user - relay an account application to the brokerage
pub async fn create_alpaca_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    // 空 body 視為 null，其餘必須是合法 JSON
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };

    let response = state.accounts.open_account(&body).await?;
    Ok(Json(response))
}

/// GET /get_company_news?symbol=AAPL&days_back=2
pub async fn get_company_news(
    State(state): State<AppState>,
    params: Result<Query<NewsQuery>, QueryRejection>,
) -> Result<Json<CompanyNews>, ApiError> {
    let Query(params) = params?;
    let news = state.news.fetch(&params.symbol, params.days_back).await?;
    Ok(Json(news))
}

/// GET /get_website_content?url=https://...
pub async fn get_website_content(
    State(state): State<AppState>,
    params: Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Json<ContentResponse>, ApiError> {
    let Query(params) = params?;
    let content = state.content.extract(params.url.trim()).await?;
    Ok(Json(ContentResponse { content }))
}
