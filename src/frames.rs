//! Frame sampling math and conversion to compact images.

use crate::config::FrameConfig;
use crate::time::TimeRange;
use crate::Result;
use image::imageops::FilterType;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sampling rate for an extraction run.
///
/// With a requested count the rate is spread so uniform extraction yields
/// approximately that many frames; otherwise one frame per second of range.
pub fn sampling_rate(range: &TimeRange, count: Option<usize>, default_fps: f64) -> f64 {
    match count {
        Some(n) => n as f64 / range.duration(),
        None => default_fps,
    }
}

/// Timestamp reported for frame `index`.
///
/// With a requested count the frames are spaced so the last one lands
/// exactly on `range.end`; a count of one degenerates to a single frame at
/// `range.start`. Without a count, frames sit one second apart.
pub fn frame_timestamp(range: &TimeRange, index: usize, count: Option<usize>) -> f64 {
    match count {
        Some(n) if n > 1 => range.start + index as f64 * range.duration() / (n - 1) as f64,
        Some(_) => range.start,
        None => range.start + index as f64,
    }
}

/// Delete excess frames from the tail until exactly `count` remain.
pub async fn trim_to_count(paths: &mut Vec<PathBuf>, count: usize) -> Result<()> {
    if paths.len() <= count {
        return Ok(());
    }

    for path in paths.drain(count..) {
        debug!("Removing excess frame {}", path.display());
        tokio::fs::remove_file(&path).await?;
    }

    Ok(())
}

/// Converts raw frames into bounded-size lossy JPEG images
#[derive(Debug, Clone)]
pub struct FrameConverter {
    /// Longest output dimension; frames already within the bound keep
    /// their size
    pub max_dimension: u32,
    /// JPEG encoder quality
    pub jpeg_quality: u8,
}

impl FrameConverter {
    pub fn new() -> Self {
        Self {
            max_dimension: 1568,
            jpeg_quality: 80,
        }
    }

    pub fn from_config(config: &FrameConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            jpeg_quality: config.jpeg_quality,
        }
    }

    /// Resize (downscale only) and re-encode a frame as JPEG.
    pub fn convert(&self, source: &Path, dest: &Path) -> Result<()> {
        let img = image::open(source)?;

        let img = if img.width().max(img.height()) > self.max_dimension {
            img.resize(self.max_dimension, self.max_dimension, FilterType::Lanczos3)
        } else {
            img
        };

        let file = File::create(dest)?;
        let mut writer = BufWriter::new(file);
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality);
        img.into_rgb8().write_with_encoder(encoder)?;

        Ok(())
    }
}

impl Default for FrameConverter {
    fn default() -> Self {
        Self::new()
    }
}
