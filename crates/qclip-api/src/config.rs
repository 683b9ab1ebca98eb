//! API configuration.

use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// HS256 secret for verifying bearer tokens
    pub jwt_secret: String,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Work directory for temporary files
    pub work_dir: PathBuf,
    /// Minimum clip duration in seconds
    pub min_clip_duration: f64,
    /// Maximum clip duration in seconds
    pub max_clip_duration: f64,
    /// Max request body size
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            jwt_secret: String::new(),
            database_path: PathBuf::from("data/qclip.db"),
            work_dir: PathBuf::from("/tmp/qclip"),
            min_clip_duration: 10.0,
            max_clip_duration: 60.0,
            max_body_size: 100 * 1024 * 1024, // 100MB uploads
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or_default(),
            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/qclip.db")),
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/qclip")),
            min_clip_duration: std::env::var("MIN_CLIP_DURATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10.0),
            max_clip_duration: std::env::var("MAX_CLIP_DURATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60.0),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100 * 1024 * 1024),
        }
    }
}
