// Fixed lookup tables consumed by the rule engine.
// Read-only for the life of the process; there is no mutation API.

use crate::enrichment::models::TaskCategory;

/// Ordered quality adjectives per category. The rule engine uses the first.
pub fn quality_adjectives(category: TaskCategory) -> &'static [&'static str] {
    match category {
        TaskCategory::Writing => &["compelling", "engaging", "well-structured"],
        TaskCategory::Analysis => &["thorough", "data-driven", "insightful"],
        TaskCategory::Development => &["clean", "maintainable", "efficient"],
        TaskCategory::Design => &["user-centered", "intuitive", "accessible"],
    }
}

/// Presence of any of these (case-insensitive) suppresses task augmentation.
pub const QUALITY_DESCRIPTORS: &[&str] =
    &["high-quality", "professional", "excellent", "comprehensive"];

/// Leading verbs after which the category adjective is spliced in.
pub const AUGMENTABLE_VERBS: &[&str] = &["write", "create", "develop", "build", "design"];

/// Recognised tones and the phrase each appends to the task.
pub const TONE_PHRASES: &[(&str, &str)] = &[
    ("professional", "Maintain a professional, polished voice throughout."),
    ("friendly", "Keep the language warm and approachable."),
    ("casual", "Write in a relaxed, conversational way."),
    ("formal", "Use formal, precise language."),
    ("persuasive", "Make a persuasive case that moves the reader to act."),
    ("analytical", "Take an analytical approach grounded in evidence."),
];

/// Boilerplate for a role the engine knows about.
#[derive(Debug, Clone, Copy)]
pub struct RoleProfile {
    pub role: &'static str,
    /// Used as the whole context when the caller sent none.
    pub default_context: &'static str,
    /// Appended to a caller-supplied context.
    pub context_hint: &'static str,
    /// Two-bullet requirements block.
    pub requirements: &'static str,
}

pub const ROLE_PROFILES: &[RoleProfile] = &[
    RoleProfile {
        role: "Software Developer",
        default_context: "This is for a software development project where code quality, maintainability and correctness matter.",
        context_hint: "Account for technical constraints and established engineering practices.",
        requirements: "- Follow established coding standards and best practices\n- Include error handling and explain key implementation decisions",
    },
    RoleProfile {
        role: "Marketing Specialist",
        default_context: "This is for a marketing initiative aimed at engaging the target audience and driving measurable results.",
        context_hint: "Keep the target audience and brand voice in mind.",
        requirements: "- Align the message with the brand voice and target audience\n- Include a clear call to action",
    },
    RoleProfile {
        role: "UX/UI Designer",
        default_context: "This is for a product design effort focused on usability, accessibility and a consistent visual language.",
        context_hint: "Consider the end user's needs and accessibility throughout.",
        requirements: "- Prioritize usability and accessibility (WCAG)\n- Keep visual hierarchy and interaction patterns consistent",
    },
];

/// Context used for unknown roles when the caller sent none.
pub const GENERIC_CONTEXT: &str =
    "This task should be approached with attention to detail and a clear understanding of the intended audience.";

/// Output instruction used when the caller sent none.
pub const DEFAULT_OUTPUT: &str = "Provide clear, organized output";

/// Looks up a recognised tone. Matching ignores case and surrounding whitespace.
pub fn tone_phrase(tone: &str) -> Option<(&'static str, &'static str)> {
    let tone = tone.trim();
    TONE_PHRASES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(tone))
        .copied()
}

/// Looks up a known role. Role names match exactly (after trimming).
pub fn role_profile(role: &str) -> Option<&'static RoleProfile> {
    let role = role.trim();
    ROLE_PROFILES.iter().find(|p| p.role == role)
}
