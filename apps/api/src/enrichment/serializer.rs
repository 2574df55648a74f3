//! Wire serialization of an assembled prompt.
//!
//! The pipeline only decides field values; turning them into text is behind
//! `PromptSerializer` so the markup can change without touching the engine.

use crate::enrichment::assembler::AssembledPrompt;

pub trait PromptSerializer: Send + Sync {
    fn serialize(&self, prompt: &AssembledPrompt) -> String;
}

/// Renders `<tag>value</tag>` per non-empty field, newline separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedMarkupSerializer;

impl PromptSerializer for TaggedMarkupSerializer {
    fn serialize(&self, prompt: &AssembledPrompt) -> String {
        prompt
            .fields
            .iter()
            .filter(|f| !f.value.trim().is_empty())
            .map(|f| {
                let tag = f.name.tag();
                format!("<{tag}>{}</{tag}>", escape(&f.value))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
