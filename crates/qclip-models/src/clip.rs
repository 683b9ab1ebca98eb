//! Clip record and artifact models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use uuid::Uuid;

use crate::video::{ParseStatusError, VideoId};

/// Unique identifier for a produced clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    /// Generate a new random clip ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClipId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ClipId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Clip status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClipStatus {
    /// Clip is being cut or uploaded
    #[default]
    Processing,
    /// Clip uploaded and available at its URL
    Completed,
    /// Cutting or upload failed
    Failed,
}

impl ClipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipStatus::Processing => "processing",
            ClipStatus::Completed => "completed",
            ClipStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ClipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClipStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(ClipStatus::Processing),
            "completed" => Ok(ClipStatus::Completed),
            "failed" => Ok(ClipStatus::Failed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A clip cut to local disk, not yet uploaded.
///
/// Holds the output path plus the source window it was cut from. The
/// window is the clamped one actually passed to the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipArtifact {
    /// Path of the encoded clip file
    pub path: PathBuf,

    /// Zero-based position among this video's produced clips
    pub index: usize,

    /// Clip window start in the source video (seconds)
    pub start: f64,

    /// Clip window end in the source video (seconds)
    pub end: f64,

    /// Transcript text of the segment this clip covers
    pub text: String,
}

impl ClipArtifact {
    /// Clip duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A clip that has been pushed to object storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UploadedClip {
    /// Public URL of the stored clip
    pub url: String,

    /// Source window start (seconds)
    pub start: f64,

    /// Source window end (seconds)
    pub end: f64,

    /// Transcript text of the covered segment
    pub text: String,
}

/// Clip record persisted alongside its parent video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClipRecord {
    /// Unique clip ID
    pub id: ClipId,

    /// Parent video ID
    pub video_id: VideoId,

    /// Public URL of the stored clip
    pub url: String,

    /// Source window start (seconds)
    pub start_time: f64,

    /// Source window end (seconds)
    pub end_time: f64,

    /// Transcript text of the covered segment
    pub text: String,

    /// Clip status
    #[serde(default)]
    pub status: ClipStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ClipRecord {
    /// Create a completed record for an uploaded clip.
    pub fn from_upload(video_id: VideoId, uploaded: &UploadedClip) -> Self {
        Self {
            id: ClipId::new(),
            video_id,
            url: uploaded.url.clone(),
            start_time: uploaded.start,
            end_time: uploaded.end,
            text: uploaded.text.clone(),
            status: ClipStatus::Completed,
            created_at: Utc::now(),
        }
    }
}

/// Sanitize a filename stem for use in storage keys and output names.
///
/// Keeps ASCII alphanumerics, spaces, hyphens and underscores, collapses
/// whitespace to underscores, lowercases, and truncates to 50 characters.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .take(50)
        .collect()
}
