//! Video record models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::clip::ClipRecord;

/// Unique identifier for an uploaded video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Error returned when a stored status string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

/// Video processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Video is being processed
    #[default]
    Processing,
    /// Processing completed successfully (clips uploaded)
    Completed,
    /// Processing failed
    Failed,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Processing => "processing",
            VideoStatus::Completed => "completed",
            VideoStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VideoStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(VideoStatus::Processing),
            "completed" => Ok(VideoStatus::Completed),
            "failed" => Ok(VideoStatus::Failed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Video record persisted for each upload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoRecord {
    /// Unique video ID
    pub id: VideoId,

    /// User ID (owner)
    pub user_id: String,

    /// Original filename as uploaded
    pub filename: String,

    /// Processing status
    #[serde(default)]
    pub status: VideoStatus,

    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Number of clips produced and uploaded
    #[serde(default)]
    pub processed_count: u32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl VideoRecord {
    /// Create a new record in the processing state.
    pub fn new(id: VideoId, user_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            filename: filename.into(),
            status: VideoStatus::Processing,
            error_message: None,
            processed_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Mark as completed with the number of uploaded clips.
    pub fn complete(mut self, processed_count: u32) -> Self {
        self.status = VideoStatus::Completed;
        self.processed_count = processed_count;
        self
    }

    /// Mark as failed.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.status = VideoStatus::Failed;
        self.error_message = Some(error.into());
        self
    }
}

/// A video together with its clips (for list views).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoWithClips {
    #[serde(flatten)]
    pub video: VideoRecord,
    #[serde(default)]
    pub clips: Vec<ClipRecord>,
}
