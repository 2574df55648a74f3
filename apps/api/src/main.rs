mod config;
mod enrichment;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod subscription;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enrichment::serializer::TaggedMarkupSerializer;
use crate::llm_client::{LlmClient, PromptGenerator};
use crate::routes::build_router;
use crate::state::AppState;
use crate::subscription::{NoPlanLookup, PgPlanLookup, PlanLookup};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Enrichment API v{}", env!("CARGO_PKG_VERSION"));

    // Subscription lookup: PostgreSQL when configured
    let plans: Arc<dyn PlanLookup> = match &config.database_url {
        Some(url) => Arc::new(PgPlanLookup::connect(url).await?),
        None => {
            warn!("DATABASE_URL not set; every plan resolves as absent");
            Arc::new(NoPlanLookup)
        }
    };

    // Generation API: optional, falls back to local synthesis
    let generator: Option<Arc<dyn PromptGenerator>> = match &config.llm_api_key {
        Some(key) => {
            let llm = LlmClient::new(
                key.clone(),
                config.llm_base_url.clone(),
                config.llm_model.clone(),
            )?;
            info!("LLM client initialized (model: {})", llm.model());
            Some(Arc::new(llm))
        }
        None => {
            warn!("LLM_API_KEY not set; full enhancements use the local fallback");
            None
        }
    };

    let state = AppState {
        plans,
        generator,
        serializer: Arc::new(TaggedMarkupSerializer),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
