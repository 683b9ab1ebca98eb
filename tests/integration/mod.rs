//! Integration tests for the clipping backend.
//!
//! Most tests run against temp directories and an in-process router. Tests
//! marked `#[ignore]` require external services (ffmpeg, AWS, Cloudinary)
//! and run with: `cargo test --test integration -- --ignored`

pub mod api_tests;
pub mod db_tests;
pub mod pipeline_tests;
pub mod storage_tests;
