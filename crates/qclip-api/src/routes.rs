//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::edit::{adjust_speed, crop_video, merge_videos, rotate_video, trim_video};
use crate::handlers::health;
use crate::handlers::upload::upload_video;
use crate::handlers::videos::{delete_video, list_videos};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let edit_routes = Router::new()
        .route("/edit/trim", post(trim_video))
        .route("/edit/speed", post(adjust_speed))
        .route("/edit/crop", post(crop_video))
        .route("/edit/rotate", post(rotate_video))
        .route("/edit/merge", post(merge_videos));

    let video_routes = Router::new()
        .route("/videos", get(list_videos))
        .route("/videos/", get(list_videos))
        .route("/videos/:video_id", delete(delete_video));

    let health_routes = Router::new().route("/health", get(health));

    Router::new()
        .route("/upload", post(upload_video))
        .merge(edit_routes)
        .merge(video_routes)
        .merge(health_routes)
        // Multipart bodies are read through axum's default limit, so both
        // caps are raised to the configured size together.
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer())
        .with_state(state)
}
