//! Clip Inspector - frame and transcript extraction for video clips
//!
//! Command-line utilities that drive ffmpeg/ffprobe and a whisper.cpp
//! binding to pull frames and transcripts out of a time range of a video
//! file, plus a helper for fetching model weights.

pub mod audio;
pub mod config;
pub mod frames;
pub mod time;
pub mod transcription;
pub mod video;

// Re-export main types for easy access
pub use crate::audio::AudioExtractor;
pub use crate::config::Config;
pub use crate::frames::FrameConverter;
pub use crate::time::{parse_time_spec, TimeRange};
pub use crate::transcription::{
    SpeechRecognizer, TranscribeOptions, TranscriptSegment, WhisperEngine,
};
pub use crate::video::VideoProcessor;

/// Result type for clip operations
pub type Result<T> = std::result::Result<T, ClipError>;

/// Error types for clip operations
#[derive(thiserror::Error, Debug)]
pub enum ClipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    #[error("ffprobe error: {0}")]
    FFprobe(String),

    #[error("ffmpeg error: {0}")]
    FFmpeg(String),

    #[error("no audio stream in input")]
    NoAudioStream,

    #[error("Audio file was created but is empty")]
    EmptyAudio,

    #[error(
        "No Whisper model found. Please download a model first:\n  \
         clip-models base.en\n\n\
         Expected model location: {models_dir}/<model-name>.bin"
    )]
    ModelNotFound { models_dir: String },

    #[error("Whisper error: {0}")]
    Whisper(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
