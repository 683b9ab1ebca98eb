//! Single-shot edit handlers: trim, speed, crop, rotate, merge.
//!
//! Each endpoint takes a multipart upload, applies one FFmpeg transform,
//! pushes the result to Cloudinary and returns its URL. Nothing is
//! persisted; the scratch files are removed after the response.

use std::path::{Path, PathBuf};

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use qclip_models::sanitize_filename;
use qclip_storage::StorageKind;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::handlers::forms::{read_form, required_f64, required_u32, single_file, spawn_cleanup};
use crate::state::AppState;

/// Response for all edit endpoints.
#[derive(Serialize)]
pub struct EditResponse {
    pub url: String,
}

/// Cut the window `[start, end)` out of the uploaded video.
pub async fn trim_video(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<EditResponse>> {
    let work_dir = state.new_work_dir().await?;
    let result = run_trim(&state, &user, &mut multipart, &work_dir).await;
    spawn_cleanup(work_dir);
    result.map(Json)
}

async fn run_trim(
    state: &AppState,
    user: &AuthUser,
    multipart: &mut Multipart,
    work_dir: &Path,
) -> ApiResult<EditResponse> {
    let form = read_form(multipart, work_dir).await?;
    let input = single_file(&form)?;
    let start = required_f64(&form.fields, "start")?;
    let end = required_f64(&form.fields, "end")?;

    info!(user_id = %user.user_id, start, end, "Trim request");

    let output = work_dir.join(output_name("trimmed", &input.filename));
    qclip_media::trim_video(&input.path, &output, start, end, &state.encoding).await?;

    upload_edited(state, &output).await
}

/// Change playback speed by `factor`.
pub async fn adjust_speed(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<EditResponse>> {
    let work_dir = state.new_work_dir().await?;
    let result = run_speed(&state, &user, &mut multipart, &work_dir).await;
    spawn_cleanup(work_dir);
    result.map(Json)
}

async fn run_speed(
    state: &AppState,
    user: &AuthUser,
    multipart: &mut Multipart,
    work_dir: &Path,
) -> ApiResult<EditResponse> {
    let form = read_form(multipart, work_dir).await?;
    let input = single_file(&form)?;
    let factor = required_f64(&form.fields, "factor")?;

    info!(user_id = %user.user_id, factor, "Speed request");

    let output = work_dir.join(output_name("speed", &input.filename));
    qclip_media::change_speed(&input.path, &output, factor, &state.encoding).await?;

    upload_edited(state, &output).await
}

/// Crop the rectangle between corners `(x1, y1)` and `(x2, y2)`.
pub async fn crop_video(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<EditResponse>> {
    let work_dir = state.new_work_dir().await?;
    let result = run_crop(&state, &user, &mut multipart, &work_dir).await;
    spawn_cleanup(work_dir);
    result.map(Json)
}

async fn run_crop(
    state: &AppState,
    user: &AuthUser,
    multipart: &mut Multipart,
    work_dir: &Path,
) -> ApiResult<EditResponse> {
    let form = read_form(multipart, work_dir).await?;
    let input = single_file(&form)?;
    let x1 = required_u32(&form.fields, "x1")?;
    let y1 = required_u32(&form.fields, "y1")?;
    let x2 = required_u32(&form.fields, "x2")?;
    let y2 = required_u32(&form.fields, "y2")?;

    info!(user_id = %user.user_id, x1, y1, x2, y2, "Crop request");

    let output = work_dir.join(output_name("cropped", &input.filename));
    qclip_media::crop_rect(&input.path, &output, x1, y1, x2, y2, &state.encoding).await?;

    upload_edited(state, &output).await
}

/// Rotate by `angle` degrees.
pub async fn rotate_video(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<EditResponse>> {
    let work_dir = state.new_work_dir().await?;
    let result = run_rotate(&state, &user, &mut multipart, &work_dir).await;
    spawn_cleanup(work_dir);
    result.map(Json)
}

async fn run_rotate(
    state: &AppState,
    user: &AuthUser,
    multipart: &mut Multipart,
    work_dir: &Path,
) -> ApiResult<EditResponse> {
    let form = read_form(multipart, work_dir).await?;
    let input = single_file(&form)?;
    let angle = required_f64(&form.fields, "angle")?;

    info!(user_id = %user.user_id, angle, "Rotate request");

    let output = work_dir.join(output_name("rotated", &input.filename));
    qclip_media::rotate_video(&input.path, &output, angle, &state.encoding).await?;

    upload_edited(state, &output).await
}

/// Concatenate the uploaded videos in received order.
pub async fn merge_videos(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<EditResponse>> {
    let work_dir = state.new_work_dir().await?;
    let result = run_merge(&state, &user, &mut multipart, &work_dir).await;
    spawn_cleanup(work_dir);
    result.map(Json)
}

async fn run_merge(
    state: &AppState,
    user: &AuthUser,
    multipart: &mut Multipart,
    work_dir: &Path,
) -> ApiResult<EditResponse> {
    let form = read_form(multipart, work_dir).await?;
    if form.files.len() < 2 {
        return Err(ApiError::bad_request("Merge requires at least two files"));
    }

    info!(user_id = %user.user_id, inputs = form.files.len(), "Merge request");

    let inputs: Vec<PathBuf> = form.files.iter().map(|f| f.path.clone()).collect();
    let output = work_dir.join(format!("merged_{}.mp4", Uuid::new_v4()));
    qclip_media::concat_videos(&inputs, &output, &state.encoding).await?;

    upload_edited(state, &output).await
}

/// Name for an edited output derived from the client filename.
fn output_name(prefix: &str, filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(sanitize_filename)
        .unwrap_or_default();
    let stem = if stem.is_empty() {
        "video".to_string()
    } else {
        stem
    };
    format!("{prefix}_{stem}.mp4")
}

/// Push the edited file to Cloudinary and wrap its URL.
async fn upload_edited(state: &AppState, output: &Path) -> ApiResult<EditResponse> {
    let object_name = output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("edited.mp4");
    let url = state
        .store
        .upload_clip(StorageKind::Cloudinary, output, object_name)
        .await?;
    Ok(EditResponse { url })
}
