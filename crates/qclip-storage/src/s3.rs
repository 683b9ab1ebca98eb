//! S3 client implementation.

use std::path::Path;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};

/// Prefix under which all clips are stored.
const UPLOAD_PREFIX: &str = "uploads";

/// Configuration for the S3 client.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Region
    pub region: String,
    /// Bucket name; may be absent, in which case uploads fail
    pub bucket_name: Option<String>,
}

impl S3Config {
    /// Create config from environment variables.
    ///
    /// Fails when the credentials are not set. The bucket name is read
    /// lazily so a missing bucket only surfaces at upload time.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID")
                .map_err(|_| StorageError::config_error("AWS_ACCESS_KEY_ID not set"))?,
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY")
                .map_err(|_| StorageError::config_error("AWS_SECRET_ACCESS_KEY not set"))?,
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            bucket_name: std::env::var("AWS_BUCKET_NAME").ok(),
        })
    }
}

/// S3 storage client.
#[derive(Clone)]
pub struct S3Client {
    client: Client,
    region: String,
    bucket: Option<String>,
}

impl S3Client {
    /// Create a new S3 client from configuration.
    pub fn new(config: S3Config) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "qclip",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .build();

        let client = Client::from_conf(sdk_config);

        Self {
            client,
            region: config.region,
            bucket: config.bucket_name,
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let config = S3Config::from_env()?;
        Ok(Self::new(config))
    }

    /// Upload a clip file and return its public URL.
    ///
    /// The object key is `uploads/{file_name}` and the returned URL is the
    /// bucket's virtual-hosted address for that key.
    pub async fn upload_video(
        &self,
        path: impl AsRef<Path>,
        file_name: &str,
    ) -> StorageResult<String> {
        let path = path.as_ref();

        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| StorageError::config_error("AWS_BUCKET_NAME not set"))?;

        let key = format!("{}/{}", UPLOAD_PREFIX, file_name);
        debug!("Uploading {} to s3://{}/{}", path.display(), bucket, key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(body)
            .content_type("video/mp4")
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        let url = format!("https://{}.s3.amazonaws.com/{}", bucket, key);
        info!("Uploaded {} to {}", path.display(), url);
        Ok(url)
    }

    /// Region this client talks to.
    pub fn region(&self) -> &str {
        &self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(bucket: Option<&str>) -> S3Client {
        S3Client::new(S3Config {
            access_key_id: "AKIATEST".to_string(),
            secret_access_key: "secret".to_string(),
            region: "us-east-1".to_string(),
            bucket_name: bucket.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_upload_without_bucket_is_config_error() {
        let client = test_client(None);
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clip.mp4");
        tokio::fs::write(&file, b"stub").await.unwrap();

        let result = client.upload_video(&file, "clip.mp4").await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }

    #[test]
    fn test_region_accessor() {
        let client = test_client(Some("bucket"));
        assert_eq!(client.region(), "us-east-1");
    }
}
