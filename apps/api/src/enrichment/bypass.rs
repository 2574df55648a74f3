//! Bypass gate: keeps the rule engine from inventing content when the caller
//! supplied almost nothing and asked for minimal enhancement.

use crate::enrichment::level::ContainmentLevel;

/// Inputs shorter than this count as minimal. Measured in Unicode scalar
/// values (`chars()`), not UTF-16 units.
const MINIMAL_INPUT_CHARS: usize = 10;
/// Containment levels at or below this count as low enrichment.
const LOW_ENRICHMENT_MAX: u8 = 5;

/// Synthetic token cost reported for bypassed requests.
pub const BYPASS_TOKENS_USED: u32 = 50;
/// `modelUsed` marker distinguishing the bypass path from a real model call.
pub const BYPASS_MODEL: &str = "bypass";

/// Returns true when enhancement must be skipped entirely.
///
/// An empty context counts as not provided.
pub fn should_bypass(containment: ContainmentLevel, task: &str, context: Option<&str>) -> bool {
    let is_low_enrichment = containment.value() <= LOW_ENRICHMENT_MAX;
    is_low_enrichment && is_minimal_input(task, context)
}

fn is_minimal_input(task: &str, context: Option<&str>) -> bool {
    let short_task = task.chars().count() < MINIMAL_INPUT_CHARS;
    let short_context = context
        .filter(|c| !c.is_empty())
        .map(|c| c.chars().count() < MINIMAL_INPUT_CHARS)
        .unwrap_or(false);
    short_task || short_context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::level::EnrichmentLevel;

    fn containment(raw: f64) -> ContainmentLevel {
        EnrichmentLevel::new(Some(raw)).containment()
    }

    #[test]
    fn test_short_task_at_zero_bypasses() {
        assert!(should_bypass(containment(0.0), "hi", None));
    }

    #[test]
    fn test_level_that_rounds_to_5_still_bypasses() {
        assert!(should_bypass(containment(7.0), "hi", None));
        assert!(!should_bypass(containment(8.0), "hi", None));
    }

    #[test]
    fn test_higher_enrichment_never_bypasses() {
        assert!(!should_bypass(containment(50.0), "hi", None));
    }

    #[test]
    fn test_long_task_without_context_does_not_bypass() {
        assert!(!should_bypass(containment(0.0), "write a blog post", None));
    }

    #[test]
    fn test_short_context_triggers_bypass() {
        assert!(should_bypass(
            containment(0.0),
            "write a blog post",
            Some("web")
        ));
    }

    #[test]
    fn test_empty_context_is_not_provided() {
        assert!(!should_bypass(containment(0.0), "write a blog post", Some("")));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 9 characters, 18 bytes.
        assert!(should_bypass(containment(0.0), "ééééééééé", None));
        // 6 characters, 12 UTF-16 units.
        assert!(should_bypass(containment(0.0), "🚀🚀🚀🚀🚀🚀", None));
    }
}
