//! Single-shot edit operations: trim, speed, crop, rotate, concat.
//!
//! Each operation takes one input file (concat takes several), produces
//! one output file, and re-encodes with the standard profile.

use std::path::{Path, PathBuf};
use tracing::info;

use qclip_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Cut the window `[start, end)` out of a video.
pub async fn trim_video(
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
    if end <= start || start < 0.0 {
        return Err(MediaError::invalid_argument(format!(
            "invalid trim window: start {:.3} end {:.3}",
            start, end
        )));
    }

    info!(
        "Trimming video: {} -> {} ({:.2}s to {:.2}s)",
        input.display(),
        output.display(),
        start,
        end
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(start)
        .duration(end - start)
        .output_args(encoding.to_ffmpeg_args())
        .output_args(["-movflags", "+faststart"]);

    FfmpegRunner::new().run(&cmd).await
}

/// Change playback speed by `factor` (2.0 = twice as fast).
///
/// Video timestamps are rescaled with `setpts`; audio uses a chain of
/// `atempo` filters since a single atempo only covers factors in
/// `[0.5, 100.0]`.
pub async fn change_speed(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    factor: f64,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let atempo = build_atempo_filter(factor)?;

    info!(
        "Changing speed: {} -> {} (factor: {})",
        input.display(),
        output.display(),
        factor
    );

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(format!("setpts=PTS/{}", factor))
        .audio_filter(atempo)
        .output_args(encoding.to_ffmpeg_args())
        .output_args(["-movflags", "+faststart"]);

    FfmpegRunner::new().run(&cmd).await
}

/// Crop the rectangle between corners `(x1, y1)` and `(x2, y2)`.
pub async fn crop_rect(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    if x2 <= x1 || y2 <= y1 {
        return Err(MediaError::invalid_argument(format!(
            "invalid crop rectangle: ({}, {}) to ({}, {})",
            x1, y1, x2, y2
        )));
    }

    let filter = format!("crop={}:{}:{}:{}", x2 - x1, y2 - y1, x1, y1);

    info!(
        "Cropping video: {} -> {} ({})",
        input.display(),
        output.display(),
        filter
    );

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(filter)
        .output_args(encoding.to_ffmpeg_args())
        .output_args(["-movflags", "+faststart"]);

    FfmpegRunner::new().run(&cmd).await
}

/// Rotate counterclockwise by `angle` degrees.
///
/// Right-angle rotations map to lossless-geometry `transpose` filters;
/// arbitrary angles use the `rotate` filter.
pub async fn rotate_video(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    angle: f64,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    info!(
        "Rotating video: {} -> {} ({} degrees)",
        input.display(),
        output.display(),
        angle
    );

    let mut cmd = FfmpegCommand::new(input, output);
    if let Some(filter) = rotation_filter(angle) {
        cmd = cmd.video_filter(filter);
    }
    let cmd = cmd
        .output_args(encoding.to_ffmpeg_args())
        .output_args(["-movflags", "+faststart"]);

    FfmpegRunner::new().run(&cmd).await
}

/// Concatenate videos in order into a single output file.
///
/// Each input is first normalized to the standard encoding profile so the
/// concat demuxer can stream-copy the result.
pub async fn concat_videos(
    inputs: &[PathBuf],
    output: impl AsRef<Path>,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let output = output.as_ref();

    if inputs.len() < 2 {
        return Err(MediaError::invalid_argument(
            "concat requires at least two input files",
        ));
    }
    for input in inputs {
        if !input.exists() {
            return Err(MediaError::FileNotFound(input.clone()));
        }
    }

    info!(
        "Concatenating {} videos -> {}",
        inputs.len(),
        output.display()
    );

    let temp_dir = tempfile::tempdir()?;
    let mut segment_paths = Vec::new();

    // Normalize each input so streams match across the concat boundary
    for (i, input) in inputs.iter().enumerate() {
        let seg_path = temp_dir.path().join(format!("seg_{:04}.mp4", i));

        let cmd = FfmpegCommand::new(input, &seg_path)
            .output_args(encoding.to_ffmpeg_args())
            .output_args(["-avoid_negative_ts", "make_zero"]);

        FfmpegRunner::new().run(&cmd).await?;
        segment_paths.push(seg_path);
    }

    // Write concat list file
    let concat_list = temp_dir.path().join("concat.txt");
    let list_content: String = segment_paths
        .iter()
        .map(|p| format!("file '{}'\n", p.display()))
        .collect();
    tokio::fs::write(&concat_list, &list_content).await?;

    // Concatenate using concat demuxer with stream copy;
    // temp_dir is cleaned up when dropped
    let cmd = FfmpegCommand::new(&concat_list, output)
        .input_arg("-f")
        .input_arg("concat")
        .input_arg("-safe")
        .input_arg("0")
        .output_args(["-c", "copy", "-movflags", "+faststart"]);

    FfmpegRunner::new().run(&cmd).await
}

/// Build an atempo filter chain for the given speed factor.
///
/// A single atempo only accepts `[0.5, 100.0]`, so factors outside that
/// range are decomposed into a chain.
fn build_atempo_filter(factor: f64) -> MediaResult<String> {
    if factor <= 0.0 || !factor.is_finite() {
        return Err(MediaError::invalid_argument(format!(
            "speed factor must be positive, got {}",
            factor
        )));
    }

    let mut parts = Vec::new();
    let mut remaining = factor;

    while remaining < 0.5 {
        parts.push("atempo=0.5".to_string());
        remaining /= 0.5;
    }
    while remaining > 100.0 {
        parts.push("atempo=100.0".to_string());
        remaining /= 100.0;
    }
    parts.push(format!("atempo={}", remaining));

    Ok(parts.join(","))
}

/// Pick the rotation filter for a counterclockwise angle in degrees.
///
/// Returns `None` for a full-turn rotation (no filter needed).
fn rotation_filter(angle: f64) -> Option<String> {
    let normalized = angle.rem_euclid(360.0);

    if normalized.abs() < f64::EPSILON {
        return None;
    }
    if (normalized - 90.0).abs() < f64::EPSILON {
        return Some("transpose=2".to_string());
    }
    if (normalized - 180.0).abs() < f64::EPSILON {
        return Some("transpose=2,transpose=2".to_string());
    }
    if (normalized - 270.0).abs() < f64::EPSILON {
        return Some("transpose=1".to_string());
    }

    // ffmpeg's rotate filter takes clockwise radians
    Some(format!("rotate=-{}*PI/180", normalized))
}
