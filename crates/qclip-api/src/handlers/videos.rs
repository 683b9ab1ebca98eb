//! Video listing and deletion handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use qclip_models::{VideoId, VideoWithClips};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List the caller's videos, newest first, with their clips.
pub async fn list_videos(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<VideoWithClips>>> {
    let videos = state.db.list_videos_with_clips(&user.user_id).await?;
    Ok(Json(videos))
}

/// Delete video response.
#[derive(Serialize)]
pub struct DeleteVideoResponse {
    pub detail: String,
}

/// Delete one of the caller's videos along with its clip records.
pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<DeleteVideoResponse>> {
    let id = VideoId::from_string(video_id);

    let deleted = state.db.delete_video(&id, &user.user_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Video not found"));
    }

    info!(video_id = %id, user_id = %user.user_id, "Video deleted");

    Ok(Json(DeleteVideoResponse {
        detail: "Video deleted successfully".to_string(),
    }))
}
