//! Request and output shapes shared by every stage of the enrichment pipeline.

use serde::{Deserialize, Serialize};

/// Raw prompt request as received from a caller.
///
/// `task` and `role` are required by the HTTP boundary; the pipeline itself
/// never mutates a request, it only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    pub task: String,
    pub role: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(flatten)]
    pub options: EnrichmentOptions,
}

/// Every recognised enrichment option and what it does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentOptions {
    /// Tone key (`professional`, `friendly`, ...). Adds a phrase to the task and a
    /// directive to the style. Unknown tones are ignored.
    #[serde(default)]
    pub tone: Option<String>,
    /// Emitted as a bulleted `constraints` field in full mode.
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Emitted verbatim as an `examples` field in full mode.
    #[serde(default)]
    pub examples: Option<String>,
    /// Appended to the output instruction unless it already talks about a goal.
    #[serde(default)]
    pub goals: Option<String>,
}

/// Category a task is classified into. Drives the task adjective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Writing,
    Analysis,
    Development,
    Design,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Writing => "writing",
            TaskCategory::Analysis => "analysis",
            TaskCategory::Development => "development",
            TaskCategory::Design => "design",
        }
    }
}

/// Text fields after the rule engine ran. Built fresh from a request, the
/// request is not consulted again once this exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPrompt {
    pub task: String,
    pub context: String,
    pub requirements: String,
    pub style: String,
    pub output: String,
}

/// Named slot in an assembled prompt. Order of declaration is not significant;
/// the assembler decides emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptField {
    Task,
    Context,
    Requirements,
    Role,
    Style,
    Output,
    Constraints,
    Examples,
}

impl PromptField {
    pub fn tag(&self) -> &'static str {
        match self {
            PromptField::Task => "task",
            PromptField::Context => "context",
            PromptField::Requirements => "requirements",
            PromptField::Role => "role",
            PromptField::Style => "style",
            PromptField::Output => "output",
            PromptField::Constraints => "constraints",
            PromptField::Examples => "examples",
        }
    }
}
