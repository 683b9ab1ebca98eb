//! Pipeline integration tests.
//!
//! The segmentation tests exercise the interpolated-timing and windowing
//! rules end to end over real timelines. The full-pipeline tests use a
//! canned speech backend so they run without a speech service; only the
//! `#[ignore]` test needs ffmpeg and Cloudinary.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::TempDir;

use qclip_db::Database;
use qclip_models::{EncodingConfig, VideoId, VideoStatus};
use qclip_pipeline::transcriber::interpolate_timeline;
use qclip_pipeline::{
    segment_transcript, PipelineResult, ProcessRequest, SpeechRecognizer, Transcriber,
    VideoPipeline,
};
use qclip_storage::{ClipStore, StorageKind};

/// Speech backend that returns a fixed transcript and counts calls.
struct CannedSpeech {
    transcript: &'static str,
    calls: AtomicUsize,
}

impl CannedSpeech {
    fn new(transcript: &'static str) -> Self {
        Self {
            transcript,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for CannedSpeech {
    async fn recognize_wav(&self, _audio_path: &Path) -> PipelineResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.to_string())
    }
}

fn request_for(dir: &TempDir, video_id: VideoId, filename: &str) -> ProcessRequest {
    ProcessRequest {
        video_id,
        user_id: "user-1".to_string(),
        filename: filename.to_string(),
        video_path: dir.path().join(filename),
        work_dir: dir.path().to_path_buf(),
        storage: StorageKind::Cloudinary,
        min_duration: 10.0,
        max_duration: 60.0,
        refine: false,
    }
}

/// Three even sentences over a minute become three 20 second segments.
#[test]
fn test_even_sentences_segment_cleanly() {
    let text = "one two three four. five six seven eight. nine ten eleven twelve.";
    let timeline = interpolate_timeline(text, 60.0);
    let segments = segment_transcript(&timeline, 10.0, 60.0);

    assert_eq!(segments.len(), 3);
    for (i, segment) in segments.iter().enumerate() {
        assert!((segment.start - i as f64 * 20.0).abs() < 1e-6);
        assert!((segment.end - (i as f64 + 1.0) * 20.0).abs() < 1e-6);
    }
    assert_eq!(segments[0].text, "one two three four.");
    assert_eq!(segments[2].text, "nine ten eleven twelve.");
}

/// One sentence longer than the cap splits into equal parts, each part
/// keeping the full sentence text.
#[test]
fn test_long_sentence_splits_evenly() {
    let words: Vec<String> = (0..9)
        .map(|i| {
            if i == 8 {
                "done.".to_string()
            } else {
                format!("word{i}")
            }
        })
        .collect();
    let text = words.join(" ");
    let timeline = interpolate_timeline(&text, 90.0);
    let segments = segment_transcript(&timeline, 10.0, 60.0);

    assert_eq!(segments.len(), 2);
    assert!(segments[0].start.abs() < 1e-6);
    assert!((segments[0].end - 45.0).abs() < 1e-6);
    assert!((segments[1].start - 45.0).abs() < 1e-6);
    assert!((segments[1].end - 90.0).abs() < 1e-6);
    assert_eq!(segments[0].text, text);
    assert_eq!(segments[1].text, text);
}

/// A sentence shorter than the minimum produces no segments at all.
#[test]
fn test_below_minimum_discarded() {
    let timeline = interpolate_timeline("too short to keep.", 8.0);
    let segments = segment_transcript(&timeline, 10.0, 60.0);
    assert!(segments.is_empty());
}

/// Interpolated word windows tile the whole video without gaps.
#[test]
fn test_interpolated_words_tile_the_video() {
    let timeline = interpolate_timeline("a b c d e f g", 3.5);
    assert_eq!(timeline.words.len(), 7);
    for (i, word) in timeline.words.iter().enumerate() {
        assert!((word.start - i as f64 * 0.5).abs() < 1e-9);
        assert!((word.end - (i as f64 + 1.0) * 0.5).abs() < 1e-9);
    }
}

/// An unreadable source video still completes, with zero clips and the
/// speech backend never consulted.
#[tokio::test]
async fn test_unreadable_video_completes_empty() {
    let dir = TempDir::new().unwrap();
    let db = Database::new(dir.path().join("pipeline.db")).unwrap();

    let speech = Arc::new(CannedSpeech::new("never reached."));
    let pipeline = VideoPipeline::new(
        db.clone(),
        ClipStore::new(None, None),
        Transcriber::new(speech.clone()),
        None,
        EncodingConfig::default(),
    );

    let video_id = VideoId::new();
    let request = request_for(&dir, video_id.clone(), "gone.mp4");

    let processed = pipeline.process(&request).await.unwrap();
    assert!(processed.segments.is_empty());
    assert!(processed.video_urls.is_empty());
    assert_eq!(speech.calls.load(Ordering::SeqCst), 0);

    let record = db.get_video(&video_id).await.unwrap().unwrap();
    assert_eq!(record.status, VideoStatus::Completed);
    assert_eq!(record.processed_count, 0);
}

/// End to end over a synthetic source video.
#[tokio::test]
#[ignore = "requires ffmpeg and Cloudinary credentials"]
async fn test_process_generated_video() {
    dotenvy::dotenv().ok();

    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.mp4");
    let status = tokio::process::Command::new("ffmpeg")
        .args([
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=30:size=640x360:rate=24",
            "-f",
            "lavfi",
            "-i",
            "sine=frequency=440:duration=30",
            "-c:v",
            "libx264",
            "-c:a",
            "aac",
            "-shortest",
        ])
        .arg(&source)
        .status()
        .await
        .expect("Failed to run ffmpeg");
    assert!(status.success());

    let db = Database::new(dir.path().join("e2e.db")).unwrap();
    let store = ClipStore::from_env();
    let transcript =
        "This is a thirty second synthetic clip used to exercise the whole pipeline end to end.";
    let pipeline = VideoPipeline::new(
        db.clone(),
        store,
        Transcriber::new(Arc::new(CannedSpeech::new(transcript))),
        None,
        EncodingConfig::default(),
    );

    let mut request = request_for(&dir, VideoId::new(), "source.mp4");
    request.video_path = source;

    let processed = pipeline.process(&request).await.expect("Pipeline failed");
    println!("Uploaded clips: {:?}", processed.video_urls);
    assert_eq!(processed.segments.len(), 1);
    assert_eq!(processed.video_urls.len(), 1);
    assert!(processed.video_urls[0].starts_with("https://"));
}
