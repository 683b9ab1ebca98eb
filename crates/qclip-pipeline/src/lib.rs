//! Video processing pipeline.
//!
//! This crate turns one uploaded video into a set of stored clips:
//! - `transcriber`: speech-to-text with uniform per-word timing
//! - `segmenter`: sentence-bounded, duration-bounded clip windows
//! - `refine`: advisory AI pass over the derived segments
//! - `clipper`: clamp windows and cut them with FFmpeg
//! - `pipeline`: orchestration plus persistence of the outcome

pub mod clipper;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod refine;
pub mod segmenter;
pub mod speech;
pub mod traits;
pub mod transcriber;

pub use clipper::Clipper;
pub use error::{PipelineError, PipelineResult};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use pipeline::{ProcessRequest, VideoPipeline};
pub use refine::SegmentRefiner;
pub use segmenter::segment_transcript;
pub use speech::{HttpSpeechClient, SpeechConfig};
pub use traits::{CompletionClient, SpeechRecognizer};
pub use transcriber::{Transcriber, TranscriptionOutcome};
