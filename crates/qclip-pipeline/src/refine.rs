//! Advisory AI pass over the derived segments.

use std::fmt::Write;
use std::sync::Arc;

use tracing::{info, warn};

use qclip_models::Segment;

use crate::traits::CompletionClient;

/// Asks a completion model which segments look most interesting.
///
/// The answer is only logged. Segment timing and text are never changed
/// by this pass, and any failure is swallowed.
pub struct SegmentRefiner {
    completion: Arc<dyn CompletionClient>,
}

impl SegmentRefiner {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    pub async fn refine(&self, transcript: &str, segments: &[Segment]) {
        if segments.is_empty() {
            return;
        }

        let prompt = build_refinement_prompt(transcript, segments);
        match self.completion.complete(&prompt).await {
            Ok(answer) => info!("Segment refinement suggestions: {answer}"),
            Err(err) => warn!("Segment refinement failed: {err}"),
        }
    }
}

fn build_refinement_prompt(transcript: &str, segments: &[Segment]) -> String {
    let mut listing = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let _ = writeln!(
            listing,
            "{}. [{:.1}s - {:.1}s] {}",
            i + 1,
            segment.start,
            segment.end,
            segment.text
        );
    }

    format!(
        r#"You are an expert short-form video editor. A video was transcribed and
cut into candidate clips at sentence boundaries.

TRANSCRIPT:
{transcript}

CANDIDATE CLIPS:
{listing}
Pick the 3 to 5 clips most likely to hold a viewer's attention and
explain briefly why. Refer to clips by their number."#
    )
}
