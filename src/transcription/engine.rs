use crate::{ClipError, Result};
use hound::WavReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::TranscriptSegment;

/// Decoding options passed to the recognizer for one clip.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    /// Language hint for decoding
    pub language: String,
    /// Sampling temperature; 0.0 is deterministic greedy decoding
    pub temperature: f32,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            temperature: 0.0,
        }
    }
}

/// A speech-to-text backend consuming a prepared 16kHz mono PCM clip.
pub trait SpeechRecognizer {
    fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<Vec<TranscriptSegment>>;
}

/// Speech recognizer backed by whisper.cpp via whisper-rs.
///
/// GPU acceleration stays disabled; inference runs on the CPU with the
/// default backend variant.
#[derive(Debug)]
pub struct WhisperEngine {
    model_path: PathBuf,
}

impl WhisperEngine {
    pub fn new(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(ClipError::Whisper(format!(
                "Whisper model not found at: {}",
                model_path.display()
            )));
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn load_samples(audio_path: &Path) -> Result<Vec<f32>> {
        let mut reader = WavReader::open(audio_path)?;
        let raw = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<i16>, _>>()?;
        Ok(raw
            .into_iter()
            .map(|s| s as f32 / i16::MAX as f32)
            .collect())
    }
}

impl SpeechRecognizer for WhisperEngine {
    fn transcribe(
        &self,
        audio_path: &Path,
        options: &TranscribeOptions,
    ) -> Result<Vec<TranscriptSegment>> {
        let samples = Self::load_samples(audio_path)?;
        debug!("Loaded {} samples from {}", samples.len(), audio_path.display());

        let model_path_str = self
            .model_path
            .to_str()
            .ok_or_else(|| ClipError::Whisper("Invalid model path".to_string()))?;

        let ctx_params = WhisperContextParameters {
            use_gpu: false,
            ..Default::default()
        };
        let ctx = WhisperContext::new_with_params(model_path_str, ctx_params)
            .map_err(|e| ClipError::Whisper(format!("Failed to load model: {}", e)))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(&options.language));
        params.set_temperature(options.temperature);
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus::get().min(4) as i32);

        let mut state = ctx
            .create_state()
            .map_err(|e| ClipError::Whisper(format!("Failed to create state: {}", e)))?;

        info!("Running whisper inference on {}", audio_path.display());
        state
            .full(params, &samples)
            .map_err(|e| ClipError::Whisper(format!("Inference failed: {}", e)))?;

        let mut segments = Vec::new();
        for segment in state.as_iter() {
            let text = match segment.to_str() {
                Ok(t) => t,
                Err(_) => continue,
            };
            // Whisper timestamps are in centiseconds
            segments.push(TranscriptSegment {
                start_ms: segment.start_timestamp().max(0) as u64 * 10,
                end_ms: segment.end_timestamp().max(0) as u64 * 10,
                text: text.to_string(),
            });
        }

        debug!("Whisper produced {} segments", segments.len());
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_nonexistent_model_returns_error() {
        let result = WhisperEngine::new(Path::new("/nonexistent/model.bin"));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_nonexistent_model_error_message() {
        let err = WhisperEngine::new(Path::new("/nonexistent/model.bin"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("not found"), "got: {err}");
    }

    #[test]
    fn test_default_options_are_deterministic_english() {
        let options = TranscribeOptions::default();
        assert_eq!(options.language, "en");
        assert_eq!(options.temperature, 0.0);
    }

    #[test]
    fn test_load_samples_rejects_missing_file() {
        let result = WhisperEngine::load_samples(Path::new("/nonexistent/segment.wav"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_samples_normalizes_to_unit_range() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("segment.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for s in [0i16, i16::MAX, i16::MIN + 1, -1234] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let samples = WhisperEngine::load_samples(&path).unwrap();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], 1.0);
        assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}
