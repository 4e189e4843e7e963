mod dto;
mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health / connectivity checks
        .route("/", get(handlers::root))
        .route("/test", get(handlers::test_get).post(handlers::test_post))
        // Provider relays
        .route("/create_alpaca_user", post(handlers::create_alpaca_user))
        .route("/get_company_news", get(handlers::get_company_news))
        .route("/get_website_content", get(handlers::get_website_content))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
