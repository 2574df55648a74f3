//! Axum route handlers for the Enrichment API.
//!
//! Both endpoints validate the same body and run the same pipeline; they only
//! differ in what happens after it.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enrichment::assembler::AssembledField;
use crate::enrichment::enhancer::{enhance, EnhanceData};
use crate::enrichment::level::EnrichmentLevel;
use crate::enrichment::models::{EnrichmentOptions, PromptRequest, TaskCategory};
use crate::enrichment::pipeline::{run_pipeline, PipelineOutcome};
use crate::enrichment::sampling::SamplingParameters;
use crate::errors::AppError;
use crate::state::AppState;
use crate::subscription::descriptor_for;

pub const MISSING_FIELDS_MESSAGE: &str = "Task and role are required";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body accepted by every enrichment endpoint. `task` and `role` are optional
/// here so a missing field is reported with our message instead of a
/// deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentBody {
    pub task: Option<String>,
    pub role: Option<String>,
    pub context: Option<String>,
    pub requirements: Option<String>,
    pub style: Option<String>,
    pub output: Option<String>,
    #[serde(flatten)]
    pub options: EnrichmentOptions,
    pub enrichment_level: Option<f64>,
    pub user_id: Option<Uuid>,
}

impl EnrichmentBody {
    /// Splits the body into a validated request, the enrichment level and the
    /// caller id used for the plan lookup.
    pub fn validate(self) -> Result<(PromptRequest, EnrichmentLevel, Option<Uuid>), AppError> {
        let task = self.task.filter(|t| !t.trim().is_empty());
        let role = self.role.filter(|r| !r.trim().is_empty());
        let (Some(task), Some(role)) = (task, role) else {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        };

        let request = PromptRequest {
            task,
            role,
            context: self.context,
            requirements: self.requirements,
            style: self.style,
            output: self.output,
            options: self.options,
        };
        Ok((request, EnrichmentLevel::new(self.enrichment_level), self.user_id))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewData {
    pub fields: Vec<AssembledField>,
    pub markup: String,
    pub bypass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    pub containment_level: u8,
    pub enrichment_key: String,
    pub plan_cap: u32,
    pub sampling: SamplingParameters,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /enrichment/enhance
///
/// Runs the pipeline, then refines the prompt through the generation API
/// (or the local fallback). Bypassed requests never reach the API.
pub async fn handle_enhance(
    State(state): State<AppState>,
    body: Result<Json<EnrichmentBody>, JsonRejection>,
) -> Result<Json<ApiResponse<EnhanceData>>, AppError> {
    let outcome = run_for_body(&state, body).await?;

    let data = enhance(
        &outcome,
        state.serializer.as_ref(),
        state.generator.as_deref(),
    )
    .await;

    Ok(ApiResponse::ok(data))
}

/// POST /enrichment/preview
///
/// Returns the assembled fields, markup and sampling parameters without
/// calling the generation API.
pub async fn handle_preview(
    State(state): State<AppState>,
    body: Result<Json<EnrichmentBody>, JsonRejection>,
) -> Result<Json<ApiResponse<PreviewData>>, AppError> {
    let outcome = run_for_body(&state, body).await?;
    let markup = state.serializer.serialize(&outcome.assembled);

    Ok(ApiResponse::ok(PreviewData {
        fields: outcome.assembled.fields,
        markup,
        bypass: outcome.bypass,
        category: outcome.category,
        containment_level: outcome.containment_level,
        enrichment_key: outcome.enrichment_key,
        plan_cap: outcome.plan_cap,
        sampling: outcome.sampling,
    }))
}

async fn run_for_body(
    state: &AppState,
    body: Result<Json<EnrichmentBody>, JsonRejection>,
) -> Result<PipelineOutcome, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let (request, level, user_id) = body.validate()?;
    let plan = descriptor_for(state.plans.as_ref(), user_id).await?;

    Ok(run_pipeline(&request, level, &plan))
}
