//! Shared data models for the QuikClips backend.
//!
//! This crate provides Serde-serializable types for:
//! - Timed transcripts and word-level timing
//! - Transcript segments and clip windows
//! - Video and clip records with processing status
//! - Encoding configuration

pub mod clip;
pub mod encoding;
pub mod segment;
pub mod transcript;
pub mod video;

// Re-export common types
pub use clip::{sanitize_filename, ClipArtifact, ClipId, ClipRecord, ClipStatus, UploadedClip};
pub use encoding::EncodingConfig;
pub use segment::{ProcessedVideo, Segment, SegmentSummary};
pub use transcript::{TranscriptTimeline, WordTiming};
pub use video::{ParseStatusError, VideoId, VideoRecord, VideoStatus, VideoWithClips};
