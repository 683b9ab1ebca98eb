//! Cut segment windows out of the source video.

use std::path::Path;

use tracing::{debug, warn};

use qclip_media::cut_clip;
use qclip_models::{ClipArtifact, EncodingConfig, Segment};

use crate::error::PipelineResult;

/// Clamp a segment window to `[0, duration]`.
///
/// Returns `None` when nothing of the window overlaps the video.
fn clamp_window(start: f64, end: f64, duration: f64) -> Option<(f64, f64)> {
    let start = start.max(0.0);
    let end = end.min(duration);

    if start >= duration || end <= start {
        return None;
    }

    Some((start, end))
}

/// Cuts one clip file per usable segment.
pub struct Clipper {
    encoding: EncodingConfig,
}

impl Clipper {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self { encoding }
    }

    /// Cut each segment's window into `work_dir/clip_{index}.mp4`.
    ///
    /// Windows are clamped to the video bounds first; segments with no
    /// remaining overlap are skipped, leaving gaps in the index sequence.
    pub async fn cut_segments(
        &self,
        video_path: &Path,
        work_dir: &Path,
        segments: &[Segment],
        video_duration: f64,
    ) -> PipelineResult<Vec<ClipArtifact>> {
        let mut artifacts = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            let Some((start, end)) = clamp_window(segment.start, segment.end, video_duration)
            else {
                warn!(
                    "Skipping segment {index} ({:.2}s - {:.2}s) outside the {:.2}s video",
                    segment.start, segment.end, video_duration
                );
                continue;
            };

            let output = work_dir.join(format!("clip_{index}.mp4"));
            debug!("Cutting clip {index} ({start:.2}s - {end:.2}s)");
            cut_clip(video_path, &output, start, end, &self.encoding).await?;

            artifacts.push(ClipArtifact {
                path: output,
                index,
                start,
                end,
                text: segment.text.clone(),
            });
        }

        Ok(artifacts)
    }
}
