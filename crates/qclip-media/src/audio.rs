//! Audio extraction for speech recognition.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Sample rate expected by the speech recognition service.
const SPEECH_SAMPLE_RATE: &str = "16000";

/// Extract the audio track of a video as mono 16-bit PCM WAV.
///
/// The output format matches what the speech recognition service accepts:
/// pcm_s16le, 16 kHz, single channel.
pub async fn extract_audio_wav(input: impl AsRef<Path>, output: impl AsRef<Path>) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    info!(
        "Extracting audio: {} -> {}",
        input.display(),
        output.display()
    );

    let cmd = FfmpegCommand::new(input, output)
        .no_video()
        .audio_codec("pcm_s16le")
        .output_args(["-ar", SPEECH_SAMPLE_RATE, "-ac", "1"]);

    FfmpegRunner::new().run(&cmd).await
}
