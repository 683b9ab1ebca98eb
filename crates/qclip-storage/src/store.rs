//! Backend selection for clip uploads.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cloudinary::CloudinaryClient;
use crate::error::{StorageError, StorageResult};
use crate::s3::S3Client;

/// Storage backend requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Cloudinary,
    S3,
}

impl StorageKind {
    /// Parse a request value; anything other than "s3" selects Cloudinary.
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "s3" => StorageKind::S3,
            _ => StorageKind::Cloudinary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Cloudinary => "cloudinary",
            StorageKind::S3 => "s3",
        }
    }
}

/// Combined clip store over the configured backends.
///
/// S3 is optional; when a request prefers S3 but the client was never
/// configured, the upload falls back to Cloudinary.
#[derive(Clone)]
pub struct ClipStore {
    s3: Option<S3Client>,
    cloudinary: Option<CloudinaryClient>,
}

impl ClipStore {
    /// Build the store from environment variables.
    ///
    /// Missing credentials disable the respective backend instead of
    /// failing; a disabled Cloudinary only errors at upload time.
    pub fn from_env() -> Self {
        let s3 = match S3Client::from_env() {
            Ok(client) => {
                info!("S3 storage enabled (region: {})", client.region());
                Some(client)
            }
            Err(e) => {
                info!("S3 storage disabled: {}", e);
                None
            }
        };

        let cloudinary = match CloudinaryClient::from_env() {
            Ok(client) => Some(client),
            Err(e) => {
                info!("Cloudinary storage not configured: {}", e);
                None
            }
        };

        Self { s3, cloudinary }
    }

    /// Build a store from explicit clients (used by tests).
    pub fn new(s3: Option<S3Client>, cloudinary: Option<CloudinaryClient>) -> Self {
        Self { s3, cloudinary }
    }

    /// Whether the S3 backend is available.
    pub fn s3_enabled(&self) -> bool {
        self.s3.is_some()
    }

    /// Upload a clip with the preferred backend and return its public URL.
    pub async fn upload_clip(
        &self,
        kind: StorageKind,
        path: impl AsRef<Path>,
        file_name: &str,
    ) -> StorageResult<String> {
        let path = path.as_ref();

        if kind == StorageKind::S3 {
            if let Some(s3) = &self.s3 {
                return s3.upload_video(path, file_name).await;
            }
            warn!("S3 requested but not configured, falling back to Cloudinary");
        }

        let cloudinary = self.cloudinary.as_ref().ok_or_else(|| {
            StorageError::config_error("Cloudinary credentials not configured")
        })?;
        cloudinary.upload_video(path, file_name).await
    }
}
