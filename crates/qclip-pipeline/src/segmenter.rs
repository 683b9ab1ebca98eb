//! Sentence-bounded segmentation of a timed transcript.

use qclip_models::{Segment, TranscriptTimeline};

/// Derive clip windows from the transcript.
///
/// Words accumulate until a sentence boundary: a word ending in `.`, `?`
/// or `!`, or the last word of the transcript. At each boundary the
/// accumulated window is emitted if it lasts at least `min_duration`,
/// discarded otherwise. Either way the next window starts at the boundary
/// word's end, so discarded text never carries over.
///
/// A kept window longer than `max_duration` is split into the smallest
/// number of equal parts that each fit, and every part carries the full
/// sentence text.
pub fn segment_transcript(
    timeline: &TranscriptTimeline,
    min_duration: f64,
    max_duration: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();

    let last_index = match timeline.words.len().checked_sub(1) {
        Some(index) => index,
        None => return segments,
    };

    let mut current_words: Vec<&str> = Vec::new();
    let mut segment_start = 0.0_f64;

    for (i, word) in timeline.words.iter().enumerate() {
        current_words.push(word.word.as_str());

        let at_boundary = word.word.ends_with(['.', '?', '!']) || i == last_index;
        if !at_boundary {
            continue;
        }

        let segment_end = word.end;
        let duration = segment_end - segment_start;

        if duration >= min_duration {
            let text = current_words.join(" ");

            if duration > max_duration {
                let parts = (duration / max_duration).ceil() as usize;
                let part_duration = duration / parts as f64;
                for part in 0..parts {
                    let start = segment_start + part as f64 * part_duration;
                    segments.push(Segment::new(text.clone(), start, start + part_duration));
                }
            } else {
                segments.push(Segment::new(text, segment_start, segment_end));
            }
        }

        current_words.clear();
        segment_start = segment_end;
    }

    segments
}
