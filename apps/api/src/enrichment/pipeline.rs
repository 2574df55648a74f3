//! The one enrichment pipeline every entry point goes through.
//!
//! Flow: level → containment → bypass gate ─┬─ bypass: assemble supplied fields
//!                                         └─ classify → rules → assemble full
//!       plan descriptor → plan cap → sampling (both paths)
//!
//! Synchronous and side-effect free apart from logging.

use tracing::info;

use crate::enrichment::assembler::{assemble_bypass, assemble_full, AssembledPrompt};
use crate::enrichment::bypass::should_bypass;
use crate::enrichment::classifier::classify_task;
use crate::enrichment::level::{enrichment_key, EnrichmentLevel};
use crate::enrichment::models::{PromptField, PromptRequest, TaskCategory};
use crate::enrichment::plan_cap::{resolve_plan_cap, PlanDescriptor};
use crate::enrichment::rules::apply_rules;
use crate::enrichment::sampling::{derive_sampling, SamplingParameters};

/// Everything the pipeline decided for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub containment_level: u8,
    pub enrichment_key: String,
    pub plan_cap: u32,
    pub bypass: bool,
    /// `None` in bypass mode; classification never runs there.
    pub category: Option<TaskCategory>,
    /// Fields the rule engine changed. Empty in bypass mode.
    pub changed: Vec<PromptField>,
    pub assembled: AssembledPrompt,
    pub sampling: SamplingParameters,
}

/// Runs the full enrichment pipeline for a validated request.
pub fn run_pipeline(
    request: &PromptRequest,
    level: EnrichmentLevel,
    plan: &PlanDescriptor,
) -> PipelineOutcome {
    let containment = level.containment();
    let plan_cap = resolve_plan_cap(plan);
    let sampling = derive_sampling(level, plan_cap);
    let bypass = should_bypass(containment, &request.task, request.context.as_deref());

    let (category, changed, assembled) = if bypass {
        (None, Vec::new(), assemble_bypass(request))
    } else {
        let category = classify_task(&request.task);
        let outcome = apply_rules(request, category);
        let assembled = assemble_full(&outcome.prompt, &request.options);
        (Some(category), outcome.changed, assembled)
    };

    info!(
        "Enrichment pipeline: containment={} bypass={} category={:?} plan_cap={}",
        containment.value(),
        bypass,
        category,
        plan_cap
    );

    PipelineOutcome {
        containment_level: containment.value(),
        enrichment_key: enrichment_key(level),
        plan_cap,
        bypass,
        category,
        changed,
        assembled,
        sampling,
    }
}

/// Human-readable account of what the pipeline did.
pub fn explain(outcome: &PipelineOutcome) -> String {
    if outcome.bypass {
        return format!(
            "Minimal input at enrichment level {} (containment {}); returned the supplied fields without enhancement.",
            outcome.enrichment_key, outcome.containment_level
        );
    }

    let category = outcome
        .category
        .map(|c| c.as_str())
        .unwrap_or("unknown");
    let applied = if outcome.changed.is_empty() {
        "no fields needed changes".to_string()
    } else {
        let names: Vec<&str> = outcome.changed.iter().map(|f| f.tag()).collect();
        format!("enhanced {}", names.join(", "))
    };

    format!(
        "Task classified as {category} at enrichment level {} (containment {}); {applied}.",
        outcome.enrichment_key, outcome.containment_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::tables::role_profile;

    fn request(task: &str, role: &str) -> PromptRequest {
        PromptRequest {
            task: task.to_string(),
            role: role.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bypass_path_skips_classification() {
        let outcome = run_pipeline(
            &request("hi", ""),
            EnrichmentLevel::new(Some(0.0)),
            &PlanDescriptor::Absent,
        );
        assert!(outcome.bypass);
        assert!(outcome.category.is_none());
        assert!(outcome.changed.is_empty());
        assert_eq!(outcome.assembled.fields.len(), 1);
        assert_eq!(outcome.assembled.get(PromptField::Task), Some("hi"));
    }

    #[test]
    fn test_end_to_end_marketing_blog_post() {
        let outcome = run_pipeline(
            &request("write a blog post", "Marketing Specialist"),
            EnrichmentLevel::new(Some(50.0)),
            &PlanDescriptor::from("free"),
        );
        let profile = role_profile("Marketing Specialist").unwrap();

        assert!(!outcome.bypass);
        assert_eq!(outcome.category, Some(TaskCategory::Writing));
        assert_eq!(
            outcome.assembled.get(PromptField::Task),
            Some("write a compelling a blog post")
        );
        assert_eq!(
            outcome.assembled.get(PromptField::Context),
            Some(profile.default_context)
        );
        assert_eq!(
            outcome.assembled.get(PromptField::Requirements),
            Some(profile.requirements)
        );
        assert_eq!(outcome.sampling.max_tokens, 432);
        assert_eq!(outcome.plan_cap, 800);
        assert_eq!(outcome.enrichment_key, "50%");
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let req = request("analyze churn drivers", "Software Developer");
        let level = EnrichmentLevel::new(Some(73.0));
        let plan = PlanDescriptor::from("pro");
        assert_eq!(run_pipeline(&req, level, &plan), run_pipeline(&req, level, &plan));
    }

    #[test]
    fn test_long_task_at_zero_level_still_enhanced() {
        let outcome = run_pipeline(
            &request("write a product announcement", "Chef"),
            EnrichmentLevel::new(Some(0.0)),
            &PlanDescriptor::Absent,
        );
        assert!(!outcome.bypass);
        assert_eq!(outcome.sampling.max_tokens, 64);
    }

    #[test]
    fn test_explain_mentions_category_and_changes() {
        let outcome = run_pipeline(
            &request("analyze the quarterly report", "Chef"),
            EnrichmentLevel::new(Some(60.0)),
            &PlanDescriptor::Absent,
        );
        let text = explain(&outcome);
        assert!(text.contains("analysis"), "{text}");
        assert!(text.contains("context"), "{text}");
        assert!(text.contains("60%"), "{text}");
    }

    #[test]
    fn test_explain_bypass() {
        let outcome = run_pipeline(
            &request("hi", "Chef"),
            EnrichmentLevel::new(Some(2.0)),
            &PlanDescriptor::Absent,
        );
        assert!(explain(&outcome).contains("without enhancement"));
    }
}
