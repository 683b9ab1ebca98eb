//! OpenAI chat completion client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::traits::CompletionClient;

const DEFAULT_API_BASE: &str = "https://api.openai.com";
const COMPLETION_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
}

impl OpenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| PipelineError::config_error("OPENAI_API_KEY not set"))?;

        Ok(Self { api_key })
    }
}

/// Chat completion request.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// OpenAI API client.
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
    api_base: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client.
    pub fn new(config: OpenAiConfig) -> PipelineResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PipelineError::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    /// Override the API base URL (used in tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> PipelineResult<String> {
        let request = ChatRequest {
            model: COMPLETION_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = format!("{}/v1/chat/completions", self.api_base);
        debug!("Sending completion request to {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                PipelineError::refinement_failed(format!("OpenAI request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::refinement_failed(format!(
                "OpenAI returned {status}: {body}"
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            PipelineError::refinement_failed(format!("Failed to parse OpenAI response: {e}"))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::refinement_failed("No choices in OpenAI response"))
    }
}
