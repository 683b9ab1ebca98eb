//! Video upload and processing handler.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use qclip_models::{ProcessedVideo, VideoId};
use qclip_pipeline::ProcessRequest;
use qclip_storage::StorageKind;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::forms::{optional_f64, read_form, single_file, spawn_cleanup};
use crate::state::AppState;

/// Process an uploaded video end to end.
///
/// The pipeline runs synchronously within the request; the response
/// carries the derived segment windows and the stored clip URLs.
pub async fn upload_video(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<ProcessedVideo>> {
    let work_dir = state.new_work_dir().await?;
    let result = process_upload(&state, &user, &mut multipart, &work_dir).await;
    spawn_cleanup(work_dir);
    result.map(Json)
}

async fn process_upload(
    state: &AppState,
    user: &AuthUser,
    multipart: &mut Multipart,
    work_dir: &Path,
) -> ApiResult<ProcessedVideo> {
    let form = read_form(multipart, work_dir).await?;
    let input = single_file(&form)?;

    let storage = form
        .fields
        .get("storage_type")
        .map(|s| StorageKind::parse_or_default(s.trim()))
        .unwrap_or_default();
    let min_duration =
        optional_f64(&form.fields, "min_duration")?.unwrap_or(state.config.min_clip_duration);
    let max_duration =
        optional_f64(&form.fields, "max_duration")?.unwrap_or(state.config.max_clip_duration);
    let refine = form
        .fields
        .get("refine")
        .map(|v| matches!(v.trim(), "true" | "1"))
        .unwrap_or(false);

    validate_durations(min_duration, max_duration)?;

    let video_id = VideoId::new();
    info!(
        video_id = %video_id,
        user_id = %user.user_id,
        filename = %input.filename,
        storage = storage.as_str(),
        "Upload received"
    );

    let request = ProcessRequest {
        video_id,
        user_id: user.user_id.clone(),
        filename: input.filename.clone(),
        video_path: input.path.clone(),
        work_dir: work_dir.to_path_buf(),
        storage,
        min_duration,
        max_duration,
        refine,
    };

    let processed = state.pipeline.process(&request).await?;
    Ok(processed)
}

fn validate_durations(min_duration: f64, max_duration: f64) -> ApiResult<()> {
    if min_duration < 0.0 || max_duration <= 0.0 || max_duration < min_duration {
        return Err(ApiError::bad_request(
            "min_duration and max_duration must satisfy 0 <= min <= max",
        ));
    }
    Ok(())
}
