#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for video processing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Progress parsing from `-progress pipe:2`
//! - Video probing via ffprobe
//! - Audio extraction for speech recognition
//! - Clip cutting and single-shot edit operations (trim, speed, crop,
//!   rotate, concat)

pub mod audio;
pub mod command;
pub mod cut;
pub mod error;
pub mod probe;
pub mod progress;
pub mod transform;

pub use audio::extract_audio_wav;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use cut::cut_clip;
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_video, VideoInfo};
pub use progress::FfmpegProgress;
pub use transform::{change_speed, concat_videos, crop_rect, rotate_video, trim_video};
