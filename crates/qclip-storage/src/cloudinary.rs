//! Cloudinary upload client.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Cloudinary API base URL.
const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Folder all clips are uploaded into.
const UPLOAD_FOLDER: &str = "quikclips";

/// Configuration for the Cloudinary client.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    /// Cloud name (account identifier)
    pub cloud_name: String,
    /// API key
    pub api_key: String,
    /// API secret used for request signing
    pub api_secret: String,
}

impl CloudinaryConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME")
                .map_err(|_| StorageError::config_error("CLOUDINARY_CLOUD_NAME not set"))?,
            api_key: std::env::var("CLOUDINARY_API_KEY")
                .map_err(|_| StorageError::config_error("CLOUDINARY_API_KEY not set"))?,
            api_secret: std::env::var("CLOUDINARY_API_SECRET")
                .map_err(|_| StorageError::config_error("CLOUDINARY_API_SECRET not set"))?,
        })
    }
}

/// Cloudinary upload response (fields we consume).
#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: String,
}

/// Cloudinary storage client using signed video uploads.
#[derive(Clone)]
pub struct CloudinaryClient {
    config: CloudinaryConfig,
    client: Client,
    api_base: String,
}

impl CloudinaryClient {
    /// Create a new Cloudinary client from configuration.
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let config = CloudinaryConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Override the API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Upload a clip as a video resource and return its secure URL.
    pub async fn upload_video(
        &self,
        path: impl AsRef<Path>,
        file_name: &str,
    ) -> StorageResult<String> {
        let path = path.as_ref();
        debug!("Uploading {} to Cloudinary", path.display());

        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign_upload(timestamp);

        let bytes = tokio::fs::read(path).await?;
        let file_part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("video/mp4")
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("folder", UPLOAD_FOLDER.to_string())
            .part("file", file_part);

        let url = format!(
            "{}/v1_1/{}/video/upload",
            self.api_base, self.config.cloud_name
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                StorageError::upload_failed(format!("Cloudinary request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::upload_failed(format!(
                "Cloudinary returned {}: {}",
                status, error_text
            )));
        }

        let text = response.text().await.map_err(|e| {
            StorageError::upload_failed(format!("Failed to read Cloudinary response: {}", e))
        })?;
        let upload: CloudinaryUploadResponse = serde_json::from_str(&text)?;

        info!("Uploaded {} to {}", path.display(), upload.secure_url);
        Ok(upload.secure_url)
    }

    /// Compute the upload signature.
    ///
    /// Signed parameters are serialized in alphabetical order, the API
    /// secret appended, and the whole string hashed with SHA-256.
    fn sign_upload(&self, timestamp: i64) -> String {
        let to_sign = format!(
            "folder={}&timestamp={}{}",
            UPLOAD_FOLDER, timestamp, self.config.api_secret
        );

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        let digest = hasher.finalize();

        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> CloudinaryClient {
        CloudinaryClient::new(CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key123".to_string(),
            api_secret: "secret456".to_string(),
        })
    }

    #[test]
    fn test_signature_is_deterministic_hex() {
        let client = test_client();
        let sig_a = client.sign_upload(1700000000);
        let sig_b = client.sign_upload(1700000000);

        assert_eq!(sig_a, sig_b);
        assert_eq!(sig_a.len(), 64);
        assert!(sig_a.chars().all(|c| c.is_ascii_hexdigit()));

        // A different timestamp must change the signature
        let sig_c = client.sign_upload(1700000001);
        assert_ne!(sig_a, sig_c);
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/demo/video/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "secure_url": "https://res.cloudinary.com/demo/video/upload/v1/quikclips/abc.mp4",
                "public_id": "quikclips/abc"
            })))
            .mount(&server)
            .await;

        let client = test_client().with_api_base(server.uri());

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        tokio::fs::write(&file, b"stub video data").await.unwrap();

        let url = client.upload_video(&file, "clip.mp4").await.unwrap();
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/video/upload/v1/quikclips/abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_upload_maps_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1_1/demo/video/upload"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "message": "Invalid signature" }
            })))
            .mount(&server)
            .await;

        let client = test_client().with_api_base(server.uri());

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        tokio::fs::write(&file, b"stub").await.unwrap();

        let result = client.upload_video(&file, "clip.mp4").await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
    }
}
