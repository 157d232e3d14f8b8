use crate::config::AudioConfig;
use crate::time::TimeRange;
use crate::{ClipError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Audio segment extractor with settings tuned for Whisper input
#[derive(Debug, Clone)]
pub struct AudioExtractor {
    /// Sample rate of extracted audio (Whisper optimal)
    pub sample_rate: u32,
    /// Channel count of extracted audio
    pub channels: u32,
}

impl AudioExtractor {
    pub fn new() -> Self {
        Self {
            sample_rate: 16000, // 16kHz optimal for Whisper
            channels: 1,
        }
    }

    pub fn from_config(config: &AudioConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels,
        }
    }

    /// Extract a mono PCM waveform covering exactly the requested range.
    ///
    /// A failure whose ffmpeg diagnostics indicate the source has no audio
    /// track is reported as [`ClipError::NoAudioStream`]; callers treat that
    /// as a benign "nothing to transcribe" outcome. Any other failure, and
    /// an empty output file, are fatal.
    pub async fn extract_segment(
        &self,
        video_path: &Path,
        range: &TimeRange,
        output_path: &Path,
    ) -> Result<()> {
        info!(
            "Extracting audio segment from {} ({}s to {}s)",
            video_path.display(),
            range.start,
            range.end
        );

        let output = tokio::process::Command::new("ffmpeg")
            .arg("-ss")
            .arg(range.start.to_string())
            .arg("-i")
            .arg(video_path)
            .arg("-t")
            .arg(range.duration().to_string())
            .arg("-vn") // No video stream
            .arg("-f")
            .arg("wav")
            .arg("-acodec")
            .arg("pcm_s16le") // 16-bit PCM
            .arg("-ar")
            .arg(self.sample_rate.to_string())
            .arg("-ac")
            .arg(self.channels.to_string())
            .arg(output_path)
            .arg("-y") // Overwrite existing
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_extraction_failure(&stderr));
        }

        // Verify the file was written and has content
        let metadata = tokio::fs::metadata(output_path).await?;
        if metadata.len() == 0 {
            return Err(ClipError::EmptyAudio);
        }

        debug!(
            "Audio segment written: {} ({} bytes)",
            output_path.display(),
            metadata.len()
        );
        Ok(())
    }
}

impl Default for AudioExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify an ffmpeg extraction failure from its diagnostic output.
///
/// The substrings match what ffmpeg prints for sources without an audio
/// track; they are kept verbatim for compatibility with that output.
fn classify_extraction_failure(stderr: &str) -> ClipError {
    if stderr.contains("Stream map") || stderr.contains("does not contain any stream") {
        ClipError::NoAudioStream
    } else {
        ClipError::FFmpeg(stderr.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_extractor_defaults() {
        let extractor = AudioExtractor::new();
        assert_eq!(extractor.sample_rate, 16000);
        assert_eq!(extractor.channels, 1);
    }

    #[test]
    fn test_classify_no_audio_stream_map() {
        let err = classify_extraction_failure(
            "Stream map '0:a' matches no streams.\nTo ignore this, add a trailing '?'",
        );
        assert!(matches!(err, ClipError::NoAudioStream));
    }

    #[test]
    fn test_classify_no_audio_missing_stream() {
        let err = classify_extraction_failure(
            "Output file #0 does not contain any stream",
        );
        assert!(matches!(err, ClipError::NoAudioStream));
    }

    #[test]
    fn test_classify_other_failure_is_fatal() {
        let err = classify_extraction_failure("input.mp4: No such file or directory");
        assert!(matches!(err, ClipError::FFmpeg(_)));
    }

    #[tokio::test]
    async fn test_extract_segment_missing_input() {
        let extractor = AudioExtractor::new();
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("segment.wav");
        let range = TimeRange::new(0.0, 1.0);
        let result = extractor
            .extract_segment(Path::new("/nonexistent/video.mp4"), &range, &out)
            .await;
        assert!(result.is_err());
        assert!(!matches!(result, Err(ClipError::NoAudioStream)));
    }
}
