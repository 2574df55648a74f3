//! Enhancement rule engine: category- and role-specific augmentation of the
//! prompt text fields.
//!
//! Every step reads only the original request fields, never another step's
//! output, and each one is guarded so it does not re-apply to text that
//! already carries what it would add. Order is fixed: task → context →
//! requirements → style → output.

use crate::enrichment::models::{EnrichedPrompt, PromptField, PromptRequest, TaskCategory};
use crate::enrichment::tables::{
    quality_adjectives, role_profile, tone_phrase, AUGMENTABLE_VERBS, DEFAULT_OUTPUT,
    GENERIC_CONTEXT, QUALITY_DESCRIPTORS,
};

/// Requirements shorter than this (in characters) get the role block.
// Counted in Unicode scalar values, not UTF-16 units.
const SHORT_REQUIREMENTS_CHARS: usize = 50;

/// Result of running the rule engine over one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub prompt: EnrichedPrompt,
    /// Fields whose final text differs from what the caller sent.
    pub changed: Vec<PromptField>,
}

/// Runs every rule against a request already classified into `category`.
pub fn apply_rules(request: &PromptRequest, category: TaskCategory) -> RuleOutcome {
    let tone = request.options.tone.as_deref();

    let task = apply_tone_suffix(&augment_task(&request.task, category), tone);
    let context = enrich_context(request.context.as_deref(), &request.role);
    let requirements = enrich_requirements(request.requirements.as_deref(), &request.role);
    let style = enrich_style(request.style.as_deref(), tone);
    let output = enrich_output(request.output.as_deref(), request.options.goals.as_deref());

    let originals = [
        (PromptField::Task, Some(request.task.as_str()), &task),
        (PromptField::Context, request.context.as_deref(), &context),
        (PromptField::Requirements, request.requirements.as_deref(), &requirements),
        (PromptField::Style, request.style.as_deref(), &style),
        (PromptField::Output, request.output.as_deref(), &output),
    ];
    let changed = originals
        .iter()
        .filter(|(_, before, after)| before.unwrap_or("") != after.as_str())
        .map(|(field, _, _)| *field)
        .collect();

    RuleOutcome {
        prompt: EnrichedPrompt {
            task,
            context,
            requirements,
            style,
            output,
        },
        changed,
    }
}

/// Splices the category's first adjective after a leading verb.
///
/// The splice is literal: `"<verb> a <adjective>"` followed by the untouched
/// remainder, so an article already in the remainder is kept
/// (`"write a blog post"` → `"write a compelling a blog post"`).
pub fn augment_task(task: &str, category: TaskCategory) -> String {
    if has_quality_descriptor(task) {
        return task.to_string();
    }

    let Some(verb_len) = leading_verb_len(task) else {
        return task.to_string();
    };

    let adjective = quality_adjectives(category)[0];
    let (verb, rest) = task.split_at(verb_len);
    format!("{verb} a {adjective}{rest}")
}

fn has_quality_descriptor(text: &str) -> bool {
    let lower = text.to_lowercase();
    QUALITY_DESCRIPTORS.iter().any(|d| lower.contains(d))
}

/// Byte length of an augmentable verb prefix at the very start of `task`.
/// Matching is by prefix only, so `"Writes"` and `"developer"` both qualify.
fn leading_verb_len(task: &str) -> Option<usize> {
    AUGMENTABLE_VERBS.iter().find_map(|verb| {
        let head = task.get(..verb.len())?;
        head.eq_ignore_ascii_case(verb).then_some(verb.len())
    })
}

/// Appends the phrase for a recognised tone.
pub fn apply_tone_suffix(task: &str, tone: Option<&str>) -> String {
    match tone.and_then(tone_phrase) {
        Some((_, phrase)) if !task.contains(phrase) => format!("{task} {phrase}"),
        _ => task.to_string(),
    }
}

/// Synthesises a context when none was sent; otherwise adds the role hint.
pub fn enrich_context(context: Option<&str>, role: &str) -> String {
    let profile = role_profile(role);

    match context.filter(|c| !c.trim().is_empty()) {
        None => profile
            .map(|p| p.default_context)
            .unwrap_or(GENERIC_CONTEXT)
            .to_string(),
        Some(existing) => match profile {
            Some(p) if !existing.contains(p.context_hint) => {
                format!("{existing} {}", p.context_hint)
            }
            _ => existing.to_string(),
        },
    }
}

/// Adds the role requirements block to empty or short requirements.
/// Unknown roles leave requirements as sent.
pub fn enrich_requirements(requirements: Option<&str>, role: &str) -> String {
    let existing = requirements.unwrap_or("");
    let Some(profile) = role_profile(role) else {
        return existing.to_string();
    };

    if existing.trim().is_empty() {
        return profile.requirements.to_string();
    }
    if existing.chars().count() < SHORT_REQUIREMENTS_CHARS {
        return format!("{existing}\n{}", profile.requirements);
    }
    existing.to_string()
}

/// Adds a tone directive unless the style already names the tone.
pub fn enrich_style(style: Option<&str>, tone: Option<&str>) -> String {
    let existing = style.unwrap_or("");
    let Some((tone_key, _)) = tone.and_then(tone_phrase) else {
        return existing.to_string();
    };

    if existing.to_lowercase().contains(tone_key) {
        return existing.to_string();
    }

    let directive = format!("Use {tone_key} tone");
    if existing.trim().is_empty() {
        directive
    } else {
        format!("{existing}. {directive}")
    }
}

/// Defaults the output instruction and ties it to the caller's goals.
pub fn enrich_output(output: Option<&str>, goals: Option<&str>) -> String {
    let base = match output.filter(|o| !o.trim().is_empty()) {
        Some(o) => o.to_string(),
        None => DEFAULT_OUTPUT.to_string(),
    };

    match goals.filter(|g| !g.trim().is_empty()) {
        Some(goals) if !base.contains("goal") => {
            format!("{base} that aligns with the goal: {goals}")
        }
        _ => base,
    }
}
