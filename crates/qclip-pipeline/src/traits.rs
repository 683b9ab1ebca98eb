//! Seams for the external AI services.
//!
//! Both services sit behind traits so the pipeline stages can be tested
//! without network access.

use std::path::Path;

use async_trait::async_trait;

use crate::error::PipelineResult;

/// Speech-to-text backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize speech in a 16 kHz mono WAV file and return the transcript
    /// text.
    async fn recognize_wav(&self, audio_path: &Path) -> PipelineResult<String>;
}

/// Text completion backend, used for the advisory segment refinement pass.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> PipelineResult<String>;
}
