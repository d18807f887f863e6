//! In-memory client for tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::client::CompletionClient;
use super::error::LlmError;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub max_tokens: u32,
}

/// Replays canned responses in order and records every prompt it receives.
/// `Err` entries become `LlmError::Api` with a 401 status.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedClient {
    pub fn new<'a>(responses: impl IntoIterator<Item = Result<&'a str, &'a str>>) -> Self {
        let responses = responses
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            max_tokens,
        });
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(body)) => Err(LlmError::Api {
                provider: "scripted",
                status: reqwest::StatusCode::UNAUTHORIZED,
                body,
            }),
            None => Err(LlmError::EmptyResponse {
                provider: "scripted",
            }),
        }
    }
}
