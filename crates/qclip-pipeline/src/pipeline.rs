//! End-to-end orchestration for one uploaded video.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use qclip_db::Database;
use qclip_models::{
    sanitize_filename, ClipArtifact, ClipRecord, EncodingConfig, ProcessedVideo, Segment,
    UploadedClip, VideoId, VideoRecord,
};
use qclip_storage::{ClipStore, StorageKind};

use crate::clipper::Clipper;
use crate::error::PipelineResult;
use crate::refine::SegmentRefiner;
use crate::segmenter::segment_transcript;
use crate::transcriber::Transcriber;

/// One video to process.
#[derive(Debug)]
pub struct ProcessRequest {
    pub video_id: VideoId,
    pub user_id: String,

    /// Original filename as uploaded
    pub filename: String,

    /// Saved source video
    pub video_path: PathBuf,

    /// Per-request scratch directory for extracted audio and cut clips
    pub work_dir: PathBuf,

    /// Preferred storage backend
    pub storage: StorageKind,

    /// Minimum clip duration in seconds
    pub min_duration: f64,

    /// Maximum clip duration in seconds
    pub max_duration: f64,

    /// Run the advisory AI refinement pass over the segments
    pub refine: bool,
}

/// Runs the full pipeline: transcribe, segment, cut, upload, persist.
pub struct VideoPipeline {
    db: Database,
    store: ClipStore,
    transcriber: Transcriber,
    refiner: Option<SegmentRefiner>,
    clipper: Clipper,
}

impl VideoPipeline {
    pub fn new(
        db: Database,
        store: ClipStore,
        transcriber: Transcriber,
        refiner: Option<SegmentRefiner>,
        encoding: EncodingConfig,
    ) -> Self {
        Self {
            db,
            store,
            transcriber,
            refiner,
            clipper: Clipper::new(encoding),
        }
    }

    /// Process one uploaded video end to end.
    ///
    /// A video record is written up front in the processing state and
    /// finalized as completed or failed before this returns.
    pub async fn process(&self, request: &ProcessRequest) -> PipelineResult<ProcessedVideo> {
        let record = VideoRecord::new(
            request.video_id.clone(),
            &request.user_id,
            &request.filename,
        );
        self.db.insert_video(&record).await?;
        info!(
            video_id = %request.video_id,
            filename = %request.filename,
            "Processing video"
        );

        match self.run_to_completion(request).await {
            Ok(processed) => Ok(processed),
            Err(err) => {
                if let Err(db_err) = self
                    .db
                    .mark_video_failed(&request.video_id, &err.to_string())
                    .await
                {
                    error!(
                        "Failed to record failure for video {}: {db_err}",
                        request.video_id
                    );
                }
                Err(err)
            }
        }
    }

    async fn run_to_completion(&self, request: &ProcessRequest) -> PipelineResult<ProcessedVideo> {
        let uploads = self.run_stages(request).await?;

        for upload in &uploads {
            let clip = ClipRecord::from_upload(request.video_id.clone(), upload);
            self.db.insert_clip(&clip).await?;
        }
        self.db
            .mark_video_completed(&request.video_id, uploads.len() as u32)
            .await?;

        info!(
            video_id = %request.video_id,
            clips = uploads.len(),
            "Video processing completed"
        );
        Ok(ProcessedVideo::from_uploads(&uploads))
    }

    async fn run_stages(&self, request: &ProcessRequest) -> PipelineResult<Vec<UploadedClip>> {
        let outcome = self
            .transcriber
            .transcribe(&request.video_path, &request.work_dir)
            .await;
        if outcome.timeline.is_empty() {
            info!("Empty transcript, nothing to clip");
            return Ok(Vec::new());
        }

        let segments = segment_transcript(
            &outcome.timeline,
            request.min_duration,
            request.max_duration,
        );
        info!(
            "Derived {} segments from {} words",
            segments.len(),
            outcome.timeline.word_count()
        );

        if request.refine {
            self.maybe_refine(&outcome.timeline.text, &segments).await;
        }

        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let artifacts = self
            .clipper
            .cut_segments(
                &request.video_path,
                &request.work_dir,
                &segments,
                outcome.duration,
            )
            .await?;

        self.upload_artifacts(request, &artifacts).await
    }

    async fn maybe_refine(&self, transcript: &str, segments: &[Segment]) {
        match &self.refiner {
            Some(refiner) => refiner.refine(transcript, segments).await,
            None => info!("Refinement requested but no completion client is configured"),
        }
    }

    async fn upload_artifacts(
        &self,
        request: &ProcessRequest,
        artifacts: &[ClipArtifact],
    ) -> PipelineResult<Vec<UploadedClip>> {
        let mut uploads = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            let object_name = clip_object_name(&request.filename, artifact.index);
            let url = self
                .store
                .upload_clip(request.storage, &artifact.path, &object_name)
                .await?;
            info!("Uploaded clip {} to {url}", artifact.index);

            uploads.push(UploadedClip {
                url,
                start: artifact.start,
                end: artifact.end,
                text: artifact.text.clone(),
            });
        }

        Ok(uploads)
    }
}

/// Storage object name for one clip of `filename`.
fn clip_object_name(filename: &str, index: usize) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize_filename)
        .unwrap_or_default();
    let stem = if stem.is_empty() {
        "video".to_string()
    } else {
        stem
    };
    format!("{stem}_clip_{index}.mp4")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::traits::MockSpeechRecognizer;
    use qclip_models::VideoStatus;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_pipeline(dir: &TempDir) -> VideoPipeline {
        let db = Database::new(dir.path().join("test.db")).unwrap();
        VideoPipeline::new(
            db,
            ClipStore::new(None, None),
            Transcriber::new(Arc::new(MockSpeechRecognizer::new())),
            None,
            EncodingConfig::default(),
        )
    }

    fn test_request(dir: &TempDir, video_id: VideoId) -> ProcessRequest {
        ProcessRequest {
            video_id,
            user_id: "user-1".to_string(),
            filename: "talk.mp4".to_string(),
            video_path: dir.path().join("missing-video.mp4"),
            work_dir: dir.path().to_path_buf(),
            storage: StorageKind::Cloudinary,
            min_duration: 10.0,
            max_duration: 60.0,
            refine: false,
        }
    }

    #[tokio::test]
    async fn test_unreadable_video_completes_with_zero_clips() {
        let dir = TempDir::new().unwrap();
        let pipeline = test_pipeline(&dir);
        let request = test_request(&dir, VideoId::new());

        let processed = pipeline.process(&request).await.unwrap();
        assert!(processed.segments.is_empty());
        assert!(processed.video_urls.is_empty());

        let record = pipeline
            .db
            .get_video(&request.video_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, VideoStatus::Completed);
        assert_eq!(record.processed_count, 0);
    }

    #[tokio::test]
    async fn test_duplicate_video_id_is_rejected() {
        let dir = TempDir::new().unwrap();
        let pipeline = test_pipeline(&dir);
        let request = test_request(&dir, VideoId::new());

        pipeline.process(&request).await.unwrap();
        let err = pipeline.process(&request).await.unwrap_err();
        assert!(matches!(err, PipelineError::Db(_)));
    }

    #[test]
    fn test_clip_object_name() {
        assert_eq!(clip_object_name("My Talk.mp4", 0), "my_talk_clip_0.mp4");
        assert_eq!(clip_object_name("video.mov", 3), "video_clip_3.mp4");
    }

    #[test]
    fn test_clip_object_name_falls_back_on_empty_stem() {
        assert_eq!(clip_object_name("....", 1), "video_clip_1.mp4");
    }
}
