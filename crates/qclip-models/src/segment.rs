//! Transcript segment models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::clip::UploadedClip;

/// A candidate clip window produced by segmentation.
///
/// When a long sentence is split into equal parts, every part carries the
/// full sentence text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Transcript text covered by this segment
    pub text: String,

    /// Window start (seconds)
    pub start: f64,

    /// Window end (seconds, exclusive)
    pub end: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Segment duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Segment window as reported in API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SegmentSummary {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl From<&Segment> for SegmentSummary {
    fn from(segment: &Segment) -> Self {
        Self {
            start_time: segment.start,
            end_time: segment.end,
            text: segment.text.clone(),
        }
    }
}

/// Result of processing one uploaded video.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProcessedVideo {
    /// Segment windows that were cut (post clamp-and-skip)
    pub segments: Vec<SegmentSummary>,

    /// Public URLs of the uploaded clips, in segment order
    pub video_urls: Vec<String>,
}

impl ProcessedVideo {
    /// Build the response from the uploaded clips.
    pub fn from_uploads(uploads: &[UploadedClip]) -> Self {
        Self {
            segments: uploads
                .iter()
                .map(|u| SegmentSummary {
                    start_time: u.start,
                    end_time: u.end,
                    text: u.text.clone(),
                })
                .collect(),
            video_urls: uploads.iter().map(|u| u.url.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_duration() {
        let segment = Segment::new("Hello world.", 10.0, 30.0);
        assert!((segment.duration() - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_processed_video_from_uploads() {
        let uploads = vec![
            UploadedClip {
                url: "https://cdn.example.com/a.mp4".to_string(),
                start: 0.0,
                end: 20.0,
                text: "First sentence.".to_string(),
            },
            UploadedClip {
                url: "https://cdn.example.com/b.mp4".to_string(),
                start: 20.0,
                end: 45.0,
                text: "Second sentence.".to_string(),
            },
        ];

        let processed = ProcessedVideo::from_uploads(&uploads);
        assert_eq!(processed.segments.len(), 2);
        assert_eq!(processed.video_urls.len(), 2);
        assert_eq!(processed.video_urls[1], "https://cdn.example.com/b.mp4");
        assert!((processed.segments[0].end_time - 20.0).abs() < 0.001);
    }
}
