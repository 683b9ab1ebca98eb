//! Axum HTTP API server.
//!
//! This crate provides:
//! - The upload endpoint running the clipping pipeline in-request
//! - Single-shot edit endpoints (trim, speed, crop, rotate, merge)
//! - Video listing and deletion backed by SQLite
//! - Bearer token verification

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
