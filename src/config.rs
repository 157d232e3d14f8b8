use crate::{ClipError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the clip inspection tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Audio extraction settings
    pub audio: AudioConfig,

    /// Frame extraction settings
    pub frames: FrameConfig,

    /// Whisper model settings
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Target sample rate for transcription
    pub sample_rate: u32,

    /// Target channel count
    pub channels: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Longest output dimension in pixels; frames are never upscaled
    pub max_dimension: u32,

    /// JPEG quality for converted frames
    pub jpeg_quality: u8,

    /// Sampling rate when no frame count is requested
    pub default_fps: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding downloaded whisper model files
    pub models_dir: PathBuf,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_paths = [
            "clip-inspector.toml",
            "config/clip-inspector.toml",
            "~/.config/clip-inspector/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::debug!("Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(models_dir) = std::env::var("CLIP_INSPECTOR_MODELS_DIR") {
            config.models.models_dir = PathBuf::from(models_dir);
        }

        if let Ok(sample_rate) = std::env::var("CLIP_INSPECTOR_SAMPLE_RATE") {
            config.audio.sample_rate = sample_rate.parse().unwrap_or(16000);
        }

        if let Ok(max_dimension) = std::env::var("CLIP_INSPECTOR_MAX_DIMENSION") {
            config.frames.max_dimension = max_dimension.parse().unwrap_or(1568);
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(ClipError::Configuration(
                "sample_rate must be greater than 0".to_string(),
            ));
        }

        if self.frames.max_dimension == 0 {
            return Err(ClipError::Configuration(
                "max_dimension must be greater than 0".to_string(),
            ));
        }

        if self.frames.jpeg_quality == 0 || self.frames.jpeg_quality > 100 {
            return Err(ClipError::Configuration(
                "jpeg_quality must be between 1 and 100".to_string(),
            ));
        }

        if self.frames.default_fps <= 0.0 {
            return Err(ClipError::Configuration(
                "default_fps must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio: AudioConfig {
                sample_rate: 16000, // Optimal for Whisper
                channels: 1,
            },
            frames: FrameConfig {
                max_dimension: 1568,
                jpeg_quality: 80,
                default_fps: 1.0,
            },
            models: ModelConfig {
                models_dir: PathBuf::from("resources/models"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.audio.channels, 1);
        assert_eq!(config.frames.max_dimension, 1568);
        assert_eq!(config.frames.jpeg_quality, 80);
        assert_eq!(config.frames.default_fps, 1.0);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad = Config::default();
        bad.audio.sample_rate = 0;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.frames.jpeg_quality = 101;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.audio.sample_rate, config.audio.sample_rate);
        assert_eq!(parsed.models.models_dir, config.models.models_dir);
    }
}
