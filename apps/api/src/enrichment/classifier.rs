//! Task classification by ordered keyword sets, first match wins.

use crate::enrichment::models::TaskCategory;

/// Categories in evaluation order with their keyword sets.
///
/// "create" appears under both writing and design; because writing is checked
/// first, design can never win on "create" alone.
pub const CATEGORY_KEYWORDS: &[(TaskCategory, &[&str])] = &[
    (TaskCategory::Writing, &["write", "create", "compose", "draft"]),
    (TaskCategory::Analysis, &["analyze", "review", "evaluate", "assess"]),
    (TaskCategory::Development, &["code", "develop", "build", "implement"]),
    (TaskCategory::Design, &["design", "create", "layout", "interface"]),
];

/// Category used when nothing matches.
pub const DEFAULT_CATEGORY: TaskCategory = TaskCategory::Writing;

/// Classifies a task by case-insensitive substring match.
pub fn classify_task(task: &str) -> TaskCategory {
    let task_lower = task.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| task_lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_keyword() {
        assert_eq!(
            classify_task("analyze the quarterly report"),
            TaskCategory::Analysis
        );
    }

    #[test]
    fn test_no_match_defaults_to_writing() {
        assert_eq!(classify_task("summarize the meeting"), TaskCategory::Writing);
    }

    #[test]
    fn test_development_keyword() {
        assert_eq!(
            classify_task("Implement a rate limiter"),
            TaskCategory::Development
        );
    }

    #[test]
    fn test_design_keyword() {
        assert_eq!(
            classify_task("design a landing page"),
            TaskCategory::Design
        );
    }

    /// "create" belongs to writing and design; writing is checked first.
    #[test]
    fn test_create_is_always_writing() {
        assert_eq!(classify_task("create a logo"), TaskCategory::Writing);
        assert_eq!(
            classify_task("create an onboarding interface"),
            TaskCategory::Writing
        );
    }

    #[test]
    fn test_earlier_category_wins_over_later_match() {
        // "review" (analysis) beats "code" (development).
        assert_eq!(classify_task("review this code"), TaskCategory::Analysis);
        // "write" (writing) beats "code" (development).
        assert_eq!(classify_task("write code for a parser"), TaskCategory::Writing);
    }

    #[test]
    fn test_substring_match_inside_words() {
        // "decode" contains "code".
        assert_eq!(classify_task("decode the payload"), TaskCategory::Development);
    }
}
