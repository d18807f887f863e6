//! LLM-backed analysis of email drafts
//!
//! - `client`: provider HTTP clients behind the `CompletionClient` trait
//! - `prompts`: the context and question prompt templates
//! - `analyzer`: the two-step context → questions orchestration
//! - `actor`: background task that runs analyses for the TUI

mod actor;
mod analyzer;
mod client;
mod error;
mod prompts;
#[cfg(test)]
pub(crate) mod testing;

pub use actor::{AiActorHandle, AiCommand, AiEvent, AiStep, spawn_ai_actor};
pub use analyzer::Analyzer;
pub use client::{CompletionClient, LlmClient};
pub use error::AnalysisError;
