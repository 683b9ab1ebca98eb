//! Object storage clients for uploaded clips.
//!
//! This crate provides:
//! - An S3 client with deterministic public URLs
//! - A Cloudinary upload client with SHA-256 request signing
//! - A combined store that picks the backend per request, falling back
//!   from S3 to Cloudinary when S3 is not configured

pub mod cloudinary;
pub mod error;
pub mod s3;
pub mod store;

pub use cloudinary::{CloudinaryClient, CloudinaryConfig};
pub use error::{StorageError, StorageResult};
pub use s3::{S3Client, S3Config};
pub use store::{ClipStore, StorageKind};
