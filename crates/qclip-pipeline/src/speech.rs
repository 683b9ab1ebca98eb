//! HTTP client for the speech recognition service.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::traits::SpeechRecognizer;

/// Recognition requests can cover several minutes of audio.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for the speech recognition client.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Full URL of the recognition endpoint
    pub api_url: String,
    /// Bearer token for the recognition endpoint
    pub api_key: String,
}

impl SpeechConfig {
    /// Create config from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let api_url = std::env::var("SPEECH_API_URL")
            .map_err(|_| PipelineError::config_error("SPEECH_API_URL not set"))?;
        let api_key = std::env::var("SPEECH_API_KEY")
            .map_err(|_| PipelineError::config_error("SPEECH_API_KEY not set"))?;

        Ok(Self { api_url, api_key })
    }
}

/// Speech recognition response.
#[derive(Debug, Deserialize)]
struct SpeechResponse {
    text: String,
}

/// Client for the speech recognition service.
pub struct HttpSpeechClient {
    config: SpeechConfig,
    client: Client,
}

impl HttpSpeechClient {
    /// Create a new speech client.
    pub fn new(config: SpeechConfig) -> PipelineResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PipelineError::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        Self::new(SpeechConfig::from_env()?)
    }
}

#[async_trait]
impl SpeechRecognizer for HttpSpeechClient {
    async fn recognize_wav(&self, audio_path: &Path) -> PipelineResult<String> {
        let audio = tokio::fs::read(audio_path).await?;
        debug!(
            "Sending {} bytes of audio to {}",
            audio.len(),
            self.config.api_url
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .body(audio)
            .send()
            .await
            .map_err(|e| {
                PipelineError::transcription_failed(format!("Speech API request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::transcription_failed(format!(
                "Speech API returned {status}: {body}"
            )));
        }

        let recognized: SpeechResponse = response.json().await.map_err(|e| {
            PipelineError::transcription_failed(format!("Failed to parse speech response: {e}"))
        })?;

        Ok(recognized.text)
    }
}
