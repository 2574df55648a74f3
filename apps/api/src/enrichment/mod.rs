// Prompt enrichment engine.
// Implements: level quantization, plan caps, bypass gate, classification,
// rule-based enhancement, sampling derivation and assembly.
// All stages are pure; only `enhancer` talks to the generation API, through llm_client.

pub mod assembler;
pub mod bypass;
pub mod classifier;
pub mod enhancer;
pub mod handlers;
pub mod level;
pub mod models;
pub mod pipeline;
pub mod plan_cap;
pub mod rules;
pub mod sampling;
pub mod serializer;
pub mod tables;
