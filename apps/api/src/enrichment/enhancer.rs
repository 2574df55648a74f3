//! Turns a pipeline outcome into the enhance response: serialize, optionally
//! refine through the generation API, and fall back locally when that fails.
//!
//! Upstream failures never surface to the caller. The pipeline's fields and
//! sampling parameters stay valid, so the fallback reuses them as-is.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::enrichment::bypass::{BYPASS_MODEL, BYPASS_TOKENS_USED};
use crate::enrichment::models::TaskCategory;
use crate::enrichment::pipeline::{explain, PipelineOutcome};
use crate::enrichment::sampling::SamplingParameters;
use crate::enrichment::serializer::PromptSerializer;
use crate::llm_client::prompts::REFINE_SYSTEM;
use crate::llm_client::PromptGenerator;

/// `modelUsed` marker for responses synthesised without a model call.
pub const FALLBACK_MODEL: &str = "local-fallback";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceMetadata {
    pub tokens_used: u32,
    pub model_used: String,
    pub timestamp: String,
    pub containment_level: u8,
    pub enrichment_key: String,
    pub bypass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingParameters>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceData {
    pub enhanced_prompt: String,
    pub explanation: String,
    pub metadata: EnhanceMetadata,
}

/// Produces the enhance response for an outcome.
///
/// Bypass outcomes are returned immediately with the synthetic cost. Full
/// outcomes go to `generator` when one is configured.
pub async fn enhance(
    outcome: &PipelineOutcome,
    serializer: &dyn PromptSerializer,
    generator: Option<&dyn PromptGenerator>,
) -> EnhanceData {
    let markup = serializer.serialize(&outcome.assembled);
    let explanation = explain(outcome);

    if outcome.bypass {
        return EnhanceData {
            enhanced_prompt: markup,
            explanation,
            metadata: metadata(outcome, BYPASS_TOKENS_USED, BYPASS_MODEL.to_string()),
        };
    }

    let generated = match generator {
        Some(generator) => {
            match generator
                .generate(&markup, REFINE_SYSTEM, &outcome.sampling)
                .await
            {
                Ok(generation) => Some(generation),
                Err(e) => {
                    warn!("Generation API failed, using local fallback: {e}");
                    None
                }
            }
        }
        None => None,
    };

    match generated {
        Some(generation) => {
            info!(
                "Prompt refined by {} ({} tokens)",
                generation.model, generation.tokens_used
            );
            EnhanceData {
                enhanced_prompt: generation.text,
                explanation,
                metadata: metadata(outcome, generation.tokens_used, generation.model),
            }
        }
        None => {
            let tokens_used = estimate_tokens(&markup);
            EnhanceData {
                enhanced_prompt: markup,
                explanation: format!(
                    "{explanation} Generated locally without a model call (fallback)."
                ),
                metadata: metadata(outcome, tokens_used, FALLBACK_MODEL.to_string()),
            }
        }
    }
}

fn metadata(outcome: &PipelineOutcome, tokens_used: u32, model_used: String) -> EnhanceMetadata {
    EnhanceMetadata {
        tokens_used,
        model_used,
        timestamp: Utc::now().to_rfc3339(),
        containment_level: outcome.containment_level,
        enrichment_key: outcome.enrichment_key.clone(),
        bypass: outcome.bypass,
        category: outcome.category,
        sampling: (!outcome.bypass).then_some(outcome.sampling),
    }
}

/// Rough token count: one token per four characters, rounded up.
fn estimate_tokens(text: &str) -> u32 {
    text.chars().count().div_ceil(4) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::enrichment::level::EnrichmentLevel;
    use crate::enrichment::models::PromptRequest;
    use crate::enrichment::pipeline::run_pipeline;
    use crate::enrichment::plan_cap::PlanDescriptor;
    use crate::enrichment::serializer::TaggedMarkupSerializer;
    use crate::llm_client::{Generation, LlmError};

    struct RecordingGenerator {
        reply: Option<String>,
        seen: Mutex<Vec<SamplingParameters>>,
    }

    #[async_trait]
    impl PromptGenerator for RecordingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            sampling: &SamplingParameters,
        ) -> Result<Generation, LlmError> {
            self.seen.lock().unwrap().push(*sampling);
            match &self.reply {
                Some(text) => Ok(Generation {
                    text: text.clone(),
                    tokens_used: 321,
                    model: "mock-model".to_string(),
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }

    fn outcome(task: &str, level: f64) -> PipelineOutcome {
        let request = PromptRequest {
            task: task.to_string(),
            role: "Software Developer".to_string(),
            ..Default::default()
        };
        run_pipeline(&request, EnrichmentLevel::new(Some(level)), &PlanDescriptor::Absent)
    }

    #[tokio::test]
    async fn test_bypass_reports_synthetic_cost_and_skips_generator() {
        let generator = RecordingGenerator {
            reply: Some("unused".to_string()),
            seen: Mutex::new(Vec::new()),
        };
        let data = enhance(&outcome("hi", 0.0), &TaggedMarkupSerializer, Some(&generator)).await;

        assert_eq!(data.metadata.tokens_used, 50);
        assert_eq!(data.metadata.model_used, "bypass");
        assert!(data.metadata.sampling.is_none());
        assert!(data.enhanced_prompt.starts_with("<task>hi</task>"));
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_path_uses_generator_output() {
        let generator = RecordingGenerator {
            reply: Some("Refined prompt".to_string()),
            seen: Mutex::new(Vec::new()),
        };
        let outcome = outcome("build a cache layer", 50.0);
        let data = enhance(&outcome, &TaggedMarkupSerializer, Some(&generator)).await;

        assert_eq!(data.enhanced_prompt, "Refined prompt");
        assert_eq!(data.metadata.model_used, "mock-model");
        assert_eq!(data.metadata.tokens_used, 321);
        assert_eq!(generator.seen.lock().unwrap().as_slice(), &[outcome.sampling]);
    }

    #[tokio::test]
    async fn test_generator_failure_falls_back_locally() {
        let generator = RecordingGenerator {
            reply: None,
            seen: Mutex::new(Vec::new()),
        };
        let data = enhance(&outcome("build a cache layer", 50.0), &TaggedMarkupSerializer, Some(&generator)).await;

        assert_eq!(data.metadata.model_used, FALLBACK_MODEL);
        assert!(data.enhanced_prompt.contains("<task>build a clean a cache layer</task>"));
        assert!(data.explanation.contains("fallback"));
        assert!(data.metadata.sampling.is_some());
    }

    #[tokio::test]
    async fn test_no_generator_falls_back_locally() {
        let data = enhance(&outcome("build a cache layer", 50.0), &TaggedMarkupSerializer, None).await;
        assert_eq!(data.metadata.model_used, FALLBACK_MODEL);
        assert_eq!(
            data.metadata.tokens_used,
            estimate_tokens(&data.enhanced_prompt)
        );
    }

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }
}
