//! Speech-to-text with uniform per-word timing.
//!
//! The recognition service returns plain text with no timestamps, so word
//! timing is synthesized by spreading the video duration evenly across the
//! words. Consecutive word windows tile the duration without gaps.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use qclip_media::{extract_audio_wav, get_duration};
use qclip_models::{TranscriptTimeline, WordTiming};

use crate::error::PipelineResult;
use crate::traits::SpeechRecognizer;

const AUDIO_FILE: &str = "audio.wav";

/// Timeline plus the probed video duration it was interpolated over.
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub timeline: TranscriptTimeline,
    pub duration: f64,
}

impl TranscriptionOutcome {
    fn empty() -> Self {
        Self {
            timeline: TranscriptTimeline::empty(),
            duration: 0.0,
        }
    }
}

/// Turns a video file into a timed transcript.
pub struct Transcriber {
    recognizer: Arc<dyn SpeechRecognizer>,
}

impl Transcriber {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Transcribe the video at `video_path`, staging audio under `work_dir`.
    ///
    /// Any failure (unreadable video, extraction, recognition) yields an
    /// empty timeline rather than an error: the video is still processed,
    /// it just produces no clips.
    pub async fn transcribe(&self, video_path: &Path, work_dir: &Path) -> TranscriptionOutcome {
        match self.try_transcribe(video_path, work_dir).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Transcription failed, continuing with empty transcript: {err}");
                TranscriptionOutcome::empty()
            }
        }
    }

    async fn try_transcribe(
        &self,
        video_path: &Path,
        work_dir: &Path,
    ) -> PipelineResult<TranscriptionOutcome> {
        let duration = get_duration(video_path).await?;

        let audio_path = work_dir.join(AUDIO_FILE);
        let recognized = self.extract_and_recognize(video_path, &audio_path).await;

        // The temp audio is not needed once recognition has run, whether
        // it succeeded or not.
        if audio_path.exists() {
            if let Err(err) = tokio::fs::remove_file(&audio_path).await {
                debug!("Failed to remove {}: {err}", audio_path.display());
            }
        }

        let text = recognized?;
        info!(
            "Recognized {} characters of transcript over {:.1}s of video",
            text.len(),
            duration
        );

        Ok(TranscriptionOutcome {
            timeline: interpolate_timeline(&text, duration),
            duration,
        })
    }

    async fn extract_and_recognize(
        &self,
        video_path: &Path,
        audio_path: &Path,
    ) -> PipelineResult<String> {
        extract_audio_wav(video_path, audio_path).await?;
        let text = self.recognizer.recognize_wav(audio_path).await?;
        Ok(text)
    }
}

/// Spread `total_duration` evenly across the whitespace-separated words of
/// `text`.
///
/// Word `i` gets the window `[i * tpw, (i + 1) * tpw)` where `tpw` is
/// `total_duration / word_count`. The last window ends at `total_duration`.
pub fn interpolate_timeline(text: &str, total_duration: f64) -> TranscriptTimeline {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return TranscriptTimeline::empty();
    }

    let time_per_word = total_duration / tokens.len() as f64;
    let words = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            WordTiming::new(
                *token,
                i as f64 * time_per_word,
                (i + 1) as f64 * time_per_word,
            )
        })
        .collect();

    TranscriptTimeline {
        text: text.to_string(),
        words,
    }
}
