use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::enrichment::enhancer::FALLBACK_MODEL;
use crate::state::AppState;

/// GET /health
/// Reports service version and whether full enhancements reach a model or
/// the local fallback.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let generation = if state.generator.is_some() {
        "model"
    } else {
        FALLBACK_MODEL
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "enrichment-api",
        "generation": generation
    }))
}
