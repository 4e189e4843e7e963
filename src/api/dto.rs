use crate::domain::model::ExtractedContent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub status: &'static str,
    pub data: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub symbol: String,
    pub days_back: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub content: ExtractedContent,
}
