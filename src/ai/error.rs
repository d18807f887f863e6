//! Error types for LLM calls and response parsing

use thiserror::Error;

/// Failure talking to the LLM provider
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to reach {provider}: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status (bad key, rate limit, overloaded, ...)
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {provider} response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("no response content from {provider}")]
    EmptyResponse { provider: &'static str },
}

/// Failure in the two-step analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The question response was not JSON at all
    #[error("question response is not valid JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    /// Valid JSON, but not the five-category shape
    #[error("question response does not match the expected categories: {source}")]
    SchemaMismatch {
        #[source]
        source: serde_json::Error,
        raw: String,
    },
}

impl AnalysisError {
    /// Raw model output for parse failures, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } | Self::SchemaMismatch { raw, .. } => Some(raw),
            Self::Llm(_) => None,
        }
    }
}
