//! LLM provider clients (Anthropic Messages API and OpenRouter)

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::LlmError;
use crate::config::{LlmConfig, LlmProvider};

/// Anything that can turn a prompt into a completion
pub trait CompletionClient: Send + Sync {
    fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// Client for the configured provider
#[derive(Clone)]
pub enum LlmClient {
    Anthropic(AnthropicClient),
    OpenRouter(OpenRouterClient),
}

impl LlmClient {
    pub fn from_config(config: &LlmConfig, api_key: String) -> Self {
        let base_url = config.base_url().to_string();
        let model = config.model().to_string();
        match config.provider {
            LlmProvider::Anthropic => {
                Self::Anthropic(AnthropicClient::new(api_key, model, base_url))
            }
            LlmProvider::OpenRouter => {
                Self::OpenRouter(OpenRouterClient::new(api_key, model, base_url))
            }
        }
    }
}

impl CompletionClient for LlmClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        match self {
            Self::Anthropic(client) => client.complete(prompt, max_tokens).await,
            Self::OpenRouter(client) => client.complete(prompt, max_tokens).await,
        }
    }
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

// === Anthropic ===

const ANTHROPIC: &str = "Anthropic";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Concatenate all text blocks
    fn into_text(self) -> Option<String> {
        let text: String = self
            .content
            .into_iter()
            .filter(|b| b.kind == "text")
            .filter_map(|b| b.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            "{} request: model={}, prompt_len={}",
            ANTHROPIC,
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|source| LlmError::Transport {
                provider: ANTHROPIC,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: ANTHROPIC,
                status,
                body,
            });
        }

        let messages: MessagesResponse =
            response.json().await.map_err(|source| LlmError::Decode {
                provider: ANTHROPIC,
                source,
            })?;

        let text = messages
            .into_text()
            .ok_or(LlmError::EmptyResponse {
                provider: ANTHROPIC,
            })?;
        tracing::debug!("{} response: len={}", ANTHROPIC, text.len());
        Ok(text)
    }
}

// === OpenRouter ===

const OPENROUTER: &str = "OpenRouter";

/// OpenRouter API client for chat completions
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|s| !s.is_empty())
    }
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        tracing::debug!(
            "{} request: model={}, prompt_len={}",
            OPENROUTER,
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(format!(
                "{}/api/v1/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "ponder")
            .json(&request)
            .send()
            .await
            .map_err(|source| LlmError::Transport {
                provider: OPENROUTER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: OPENROUTER,
                status,
                body,
            });
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(|source| LlmError::Decode {
                provider: OPENROUTER,
                source,
            })?;

        let text = chat_response
            .into_text()
            .ok_or(LlmError::EmptyResponse {
                provider: OPENROUTER,
            })?;
        tracing::debug!("{} response: len={}", OPENROUTER, text.len());
        Ok(text)
    }
}
