//! Clip cutting.

use std::path::Path;
use tracing::{debug, info};

use qclip_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Cut the window `[start, end)` from a video into a new file.
///
/// The window must already be clamped to the source duration; this
/// function only validates that it is non-empty.
pub async fn cut_clip(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start: f64,
    end: f64,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    if end <= start {
        return Err(MediaError::invalid_argument(format!(
            "empty clip window: start {:.3} end {:.3}",
            start, end
        )));
    }

    let duration = end - start;

    info!(
        "Cutting clip: {} -> {} (start: {:.2}s, duration: {:.2}s)",
        input.display(),
        output.display(),
        start,
        duration
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(start)
        .duration(duration)
        .output_args(encoding.to_ffmpeg_args())
        .output_args(["-movflags", "+faststart"]);

    let duration_ms = (duration * 1000.0) as i64;
    FfmpegRunner::new()
        .run_with_progress(&cmd, move |p| {
            debug!(
                percent = format!("{:.0}", p.percentage(duration_ms)),
                speed = p.speed,
                "clip encode progress"
            );
        })
        .await
}
