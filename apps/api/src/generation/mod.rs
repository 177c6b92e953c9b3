// Outreach message generation.
// Implements: config precedence, prompt assembly, the per-request pipeline.
// All LLM calls go through llm_client.

pub mod config;
pub mod generator;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
