//! Shared multipart plumbing for the upload and edit handlers.
//!
//! File parts stream chunk by chunk into the request's scratch directory;
//! text parts collect into a field map. The scratch directory is removed
//! by a spawned task once the response is on its way.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::error::{ApiError, ApiResult};

/// One uploaded file saved to the scratch directory.
pub(crate) struct SavedFile {
    pub path: PathBuf,
    /// Client-supplied filename
    pub filename: String,
}

/// Parsed multipart form: saved files plus text fields.
pub(crate) struct FormData {
    pub files: Vec<SavedFile>,
    pub fields: HashMap<String, String>,
}

/// Read the whole form, saving file parts under `work_dir`.
///
/// Parts named `file` or `files` count as uploads; everything else is
/// collected as text. Unnamed parts are skipped.
pub(crate) async fn read_form(
    multipart: &mut Multipart,
    work_dir: &Path,
) -> ApiResult<FormData> {
    let mut files = Vec::new();
    let mut fields = HashMap::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "file" || name == "files" {
            let filename = field
                .file_name()
                .filter(|n| !n.is_empty())
                .unwrap_or("upload.mp4")
                .to_string();
            let path = work_dir.join(format!(
                "input_{}.{}",
                files.len(),
                file_extension(&filename)
            ));
            save_field(&mut field, &path).await?;
            files.push(SavedFile { path, filename });
        } else {
            let value = field.text().await.map_err(|e| {
                ApiError::bad_request(format!("Invalid form field {name}: {e}"))
            })?;
            fields.insert(name, value);
        }
    }

    Ok(FormData { files, fields })
}

/// Stream one file part to disk.
async fn save_field(field: &mut Field<'_>, path: &Path) -> ApiResult<()> {
    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?
    {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

/// The form's single `file` part.
pub(crate) fn single_file(form: &FormData) -> ApiResult<&SavedFile> {
    match form.files.as_slice() {
        [file] => Ok(file),
        [] => Err(ApiError::bad_request("Missing form field: file")),
        _ => Err(ApiError::bad_request("Expected exactly one file")),
    }
}

/// Required finite float field.
pub(crate) fn required_f64(fields: &HashMap<String, String>, name: &str) -> ApiResult<f64> {
    let raw = fields
        .get(name)
        .ok_or_else(|| ApiError::bad_request(format!("Missing form field: {name}")))?;
    parse_f64(raw, name)
}

/// Optional finite float field.
pub(crate) fn optional_f64(
    fields: &HashMap<String, String>,
    name: &str,
) -> ApiResult<Option<f64>> {
    match fields.get(name) {
        Some(raw) => parse_f64(raw, name).map(Some),
        None => Ok(None),
    }
}

/// Required unsigned integer field.
pub(crate) fn required_u32(fields: &HashMap<String, String>, name: &str) -> ApiResult<u32> {
    fields
        .get(name)
        .ok_or_else(|| ApiError::bad_request(format!("Missing form field: {name}")))?
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid integer for field: {name}")))
}

fn parse_f64(raw: &str, name: &str) -> ApiResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::bad_request(format!("Invalid number for field: {name}")))
}

/// Sanitized file extension for a saved upload, defaulting to mp4.
fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "mp4".to_string())
}

/// Remove a request's scratch directory after the response is produced.
pub(crate) fn spawn_cleanup(work_dir: PathBuf) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = tokio::fs::remove_dir_all(&work_dir).await {
            warn!("Failed to remove work dir {}: {e}", work_dir.display());
        }
    })
}
