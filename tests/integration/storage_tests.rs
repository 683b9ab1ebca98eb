//! Object storage integration tests.
//!
//! These hit real S3 and Cloudinary accounts, so they are ignored by
//! default and read credentials from the environment. The Cloudinary
//! tests also need ffmpeg, since Cloudinary validates that the upload
//! really is a video.

use std::path::Path;

use tempfile::TempDir;

use qclip_storage::{ClipStore, CloudinaryClient, S3Client, StorageKind};

/// Generate a one second synthetic clip at `path`.
async fn generate_clip(path: &Path) {
    let status = tokio::process::Command::new("ffmpeg")
        .args([
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=1:size=320x240:rate=24",
            "-c:v",
            "libx264",
        ])
        .arg(path)
        .status()
        .await
        .expect("Failed to run ffmpeg");
    assert!(status.success());
}

/// Test S3 upload of a small payload.
#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_s3_upload() {
    dotenvy::dotenv().ok();

    let client = S3Client::from_env().expect("Failed to create S3 client");

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("integration.mp4");
    tokio::fs::write(&file, b"integration test payload")
        .await
        .unwrap();

    let url = client
        .upload_video(&file, "integration_test.mp4")
        .await
        .expect("Upload failed");
    println!("Uploaded to {url}");
    assert!(url.starts_with("https://"));
    assert!(url.contains("uploads/integration_test.mp4"));
}

/// Test Cloudinary signed upload of a generated clip.
#[tokio::test]
#[ignore = "requires ffmpeg and Cloudinary credentials"]
async fn test_cloudinary_upload() {
    dotenvy::dotenv().ok();

    let client = CloudinaryClient::from_env().expect("Failed to create Cloudinary client");

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tiny.mp4");
    generate_clip(&file).await;

    let url = client
        .upload_video(&file, "integration_tiny.mp4")
        .await
        .expect("Upload failed");
    println!("Uploaded to {url}");
    assert!(url.starts_with("https://"));
}

/// The combined store falls back to Cloudinary when S3 is not configured.
#[tokio::test]
#[ignore = "requires ffmpeg and Cloudinary credentials"]
async fn test_store_falls_back_to_cloudinary() {
    dotenvy::dotenv().ok();

    let cloudinary = CloudinaryClient::from_env().expect("Failed to create Cloudinary client");
    let store = ClipStore::new(None, Some(cloudinary));
    assert!(!store.s3_enabled());

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("fallback.mp4");
    generate_clip(&file).await;

    // S3 requested but unavailable, upload lands on Cloudinary anyway.
    let url = store
        .upload_clip(StorageKind::S3, &file, "integration_fallback.mp4")
        .await
        .expect("Upload failed");
    println!("Uploaded to {url}");
    assert!(url.starts_with("https://"));
}
