//! Prompt assembly: decides which fields are handed to the serializer and in
//! what order. Rendering to a wire format happens elsewhere.

use serde::Serialize;

use crate::enrichment::models::{EnrichedPrompt, EnrichmentOptions, PromptField, PromptRequest};

/// One named field of an assembled prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledField {
    pub name: PromptField,
    pub value: String,
}

/// Ordered field set ready for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssembledPrompt {
    pub fields: Vec<AssembledField>,
}

impl AssembledPrompt {
    #[cfg(test)]
    pub fn get(&self, name: PromptField) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    fn push(&mut self, name: PromptField, value: impl Into<String>) {
        self.fields.push(AssembledField {
            name,
            value: value.into(),
        });
    }
}

/// Bypass path: only what the caller literally sent, in the order
/// task → context → requirements → role, skipping blank fields.
pub fn assemble_bypass(request: &PromptRequest) -> AssembledPrompt {
    let candidates = [
        (PromptField::Task, Some(request.task.as_str())),
        (PromptField::Context, request.context.as_deref()),
        (PromptField::Requirements, request.requirements.as_deref()),
        (PromptField::Role, Some(request.role.as_str())),
    ];

    let mut assembled = AssembledPrompt::default();
    for (name, value) in candidates {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            assembled.push(name, value);
        }
    }
    assembled
}

/// Full path: every enriched field, then constraints and examples when given.
pub fn assemble_full(prompt: &EnrichedPrompt, options: &EnrichmentOptions) -> AssembledPrompt {
    let mut assembled = AssembledPrompt::default();
    assembled.push(PromptField::Task, prompt.task.as_str());
    assembled.push(PromptField::Context, prompt.context.as_str());
    assembled.push(PromptField::Requirements, prompt.requirements.as_str());
    assembled.push(PromptField::Style, prompt.style.as_str());
    assembled.push(PromptField::Output, prompt.output.as_str());

    let constraints: Vec<String> = options
        .constraints
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| format!("- {c}"))
        .collect();
    if !constraints.is_empty() {
        assembled.push(PromptField::Constraints, constraints.join("\n"));
    }

    if let Some(examples) = options.examples.as_deref().filter(|e| !e.trim().is_empty()) {
        assembled.push(PromptField::Examples, examples);
    }

    assembled
}
