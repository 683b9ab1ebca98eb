//! Application state.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use qclip_db::Database;
use qclip_models::EncodingConfig;
use qclip_pipeline::{HttpSpeechClient, OpenAiClient, SegmentRefiner, Transcriber, VideoPipeline};
use qclip_storage::ClipStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub db: Database,
    pub store: ClipStore,
    pub pipeline: Arc<VideoPipeline>,
    pub encoding: EncodingConfig,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let ffmpeg = qclip_media::check_ffmpeg()?;
        let ffprobe = qclip_media::check_ffprobe()?;
        info!(
            "Media tools: ffmpeg at {}, ffprobe at {}",
            ffmpeg.display(),
            ffprobe.display()
        );

        tokio::fs::create_dir_all(&config.work_dir).await?;

        let db = Database::new(config.database_path.clone())?;
        let store = ClipStore::from_env();

        let transcriber = Transcriber::new(Arc::new(HttpSpeechClient::from_env()?));
        let refiner = match OpenAiClient::from_env() {
            Ok(client) => Some(SegmentRefiner::new(Arc::new(client))),
            Err(e) => {
                info!("Segment refinement disabled: {}", e);
                None
            }
        };

        let encoding = EncodingConfig::default();
        let pipeline = VideoPipeline::new(
            db.clone(),
            store.clone(),
            transcriber,
            refiner,
            encoding.clone(),
        );

        Ok(Self {
            config,
            db,
            store,
            pipeline: Arc::new(pipeline),
            encoding,
        })
    }

    /// Create a fresh scratch directory for one request.
    pub async fn new_work_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self.config.work_dir.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }
}
