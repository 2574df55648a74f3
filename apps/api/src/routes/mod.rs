pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::enrichment::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/enrichment/enhance", post(handlers::handle_enhance))
        .route("/enrichment/preview", post(handlers::handle_preview))
        .fallback(not_found)
        .with_state(state)
}
