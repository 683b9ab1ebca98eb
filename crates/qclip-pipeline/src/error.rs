//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Refinement failed: {0}")]
    RefinementFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Media error: {0}")]
    Media(#[from] qclip_media::MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] qclip_storage::StorageError),

    #[error("Database error: {0}")]
    Db(#[from] qclip_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn transcription_failed(msg: impl Into<String>) -> Self {
        Self::TranscriptionFailed(msg.into())
    }

    pub fn refinement_failed(msg: impl Into<String>) -> Self {
        Self::RefinementFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
