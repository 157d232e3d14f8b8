pub mod engine;
pub mod format;
pub mod models;

pub use engine::{SpeechRecognizer, TranscribeOptions, WhisperEngine};
pub use format::{render_transcript, NO_SPEECH_MESSAGE};
pub use models::{ModelDescriptor, MODEL_CATALOG};

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One speech-recognition output unit, with offsets in milliseconds
/// relative to the transcribed clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// Transcribe an extracted audio clip and render it for display.
///
/// The recognizer is provided by the caller so the inference backend is an
/// explicit startup dependency rather than something resolved mid-pipeline.
pub fn transcribe_clip(
    recognizer: &dyn SpeechRecognizer,
    audio_path: &Path,
    clip_start: f64,
) -> Result<String> {
    let options = TranscribeOptions::default();
    let segments = recognizer.transcribe(audio_path, &options)?;
    Ok(render_transcript(&segments, clip_start))
}
