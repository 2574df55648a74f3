use std::sync::Arc;

use crate::enrichment::serializer::PromptSerializer;
use crate::llm_client::PromptGenerator;
use crate::subscription::PlanLookup;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Subscription tier source. `NoPlanLookup` when no database is configured.
    pub plans: Arc<dyn PlanLookup>,
    /// Generation backend. `None` means every full-path request uses the local fallback.
    pub generator: Option<Arc<dyn PromptGenerator>>,
    pub serializer: Arc<dyn PromptSerializer>,
}
