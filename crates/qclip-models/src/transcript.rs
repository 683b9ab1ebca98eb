//! Timed transcript models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One word of the transcript with its synthesized time window.
///
/// Times are seconds from the start of the video; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WordTiming {
    /// The word as it appears in the transcript
    pub word: String,

    /// Window start (seconds)
    pub start: f64,

    /// Window end (seconds, exclusive)
    pub end: f64,
}

impl WordTiming {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }
}

/// The full transcript with per-word timing.
///
/// Word windows are synthesized by uniform interpolation over the video
/// duration, so consecutive windows tile the duration without gaps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptTimeline {
    /// Full transcript text as returned by the recognizer
    pub text: String,

    /// Per-word time windows, in transcript order
    pub words: Vec<WordTiming>,
}

impl TranscriptTimeline {
    /// An empty timeline, used when recognition produced nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_timeline() {
        let timeline = TranscriptTimeline::empty();
        assert!(timeline.is_empty());
        assert_eq!(timeline.word_count(), 0);
        assert!(timeline.text.is_empty());
    }

    #[test]
    fn test_word_timing_serde() {
        let timing = WordTiming::new("hello", 0.0, 1.25);
        let json = serde_json::to_string(&timing).unwrap();
        let back: WordTiming = serde_json::from_str(&json).unwrap();
        assert_eq!(timing, back);
    }
}
