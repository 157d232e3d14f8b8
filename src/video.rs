use crate::time::TimeRange;
use crate::{ClipError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Video prober and frame extractor backed by the ffmpeg command-line tools
#[derive(Debug, Clone, Default)]
pub struct VideoProcessor;

impl VideoProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Report the container duration of a media file in seconds.
    pub async fn probe_duration(&self, video_path: &Path) -> Result<f64> {
        let output = tokio::process::Command::new("ffprobe")
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(video_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipError::FFprobe(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration = stdout.trim().parse::<f64>().map_err(|_| {
            ClipError::FFprobe(format!(
                "could not parse duration from ffprobe output: {:?}",
                stdout.trim()
            ))
        })?;

        debug!("Probed {}: {:.3}s", video_path.display(), duration);
        Ok(duration)
    }

    /// Extract raw PNG frames from a time range at the given sampling rate.
    ///
    /// Frames land in `output_dir` as `frame-%03d.png`; the returned paths
    /// are sorted chronologically.
    pub async fn extract_frames(
        &self,
        video_path: &Path,
        range: &TimeRange,
        fps: f64,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let pattern = output_dir.join("frame-%03d.png");

        info!(
            "Extracting frames from {} ({}s to {}s, fps={})",
            video_path.display(),
            range.start,
            range.end,
            fps
        );

        let output = tokio::process::Command::new("ffmpeg")
            .arg("-ss")
            .arg(range.start.to_string())
            .arg("-i")
            .arg(video_path)
            .arg("-t")
            .arg(range.duration().to_string())
            .arg("-vf")
            .arg(format!("fps={}", fps))
            .arg(&pattern)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClipError::FFmpeg(stderr.trim().to_string()));
        }

        collect_frame_paths(output_dir).await
    }
}

/// List the `frame-*.png` files in a directory in chronological order.
pub async fn collect_frame_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with("frame-") && name.ends_with(".png") {
            names.push(name);
        }
    }

    names.sort();
    Ok(names.into_iter().map(|n| dir.join(n)).collect())
}

/// Render a duration for display, rounded to one decimal place.
pub fn format_duration_seconds(seconds: f64) -> String {
    format!("{:.1}", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(format_duration_seconds(12.34), "12.3");
        assert_eq!(format_duration_seconds(0.0), "0.0");
        assert_eq!(format_duration_seconds(59.96), "60.0");
    }

    #[tokio::test]
    async fn test_collect_frame_paths_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["frame-003.png", "frame-001.png", "frame-002.png"] {
            tokio::fs::write(dir.path().join(name), b"png").await.unwrap();
        }
        // Unrelated files are ignored
        tokio::fs::write(dir.path().join("segment.wav"), b"wav")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("frame-001.jpg"), b"jpg")
            .await
            .unwrap();

        let paths = collect_frame_paths(dir.path()).await.unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["frame-001.png", "frame-002.png", "frame-003.png"]);
    }

    #[tokio::test]
    async fn test_probe_duration_missing_file() {
        let processor = VideoProcessor::new();
        let result = processor
            .probe_duration(Path::new("/nonexistent/video.mp4"))
            .await;
        // ffprobe missing from PATH also surfaces as an error; either way
        // a bad path must not report a duration.
        assert!(result.is_err());
    }
}
