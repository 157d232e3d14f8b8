//! Whisper model catalog, local lookup, and download.

use crate::{ClipError, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// A downloadable model weight file
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// Short name used on the command line
    pub name: &'static str,
    /// Remote location of the weight file
    pub url: &'static str,
    /// Filename under the local models directory
    pub file: &'static str,
    /// Approximate size, for display
    pub size: &'static str,
    /// Human description
    pub description: &'static str,
}

/// Remote model catalog, fixed at build time.
pub const MODEL_CATALOG: &[ModelDescriptor] = &[
    ModelDescriptor {
        name: "tiny.en",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin",
        file: "tiny.en.bin",
        size: "75 MB",
        description: "Tiny English-only model (fastest, lowest accuracy)",
    },
    ModelDescriptor {
        name: "tiny",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.bin",
        file: "tiny.bin",
        size: "75 MB",
        description: "Tiny multilingual model",
    },
    ModelDescriptor {
        name: "base.en",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin",
        file: "base.en.bin",
        size: "142 MB",
        description: "Base English-only model (recommended for most use cases)",
    },
    ModelDescriptor {
        name: "base",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
        file: "base.bin",
        size: "142 MB",
        description: "Base multilingual model",
    },
    ModelDescriptor {
        name: "small.en",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.en.bin",
        file: "small.en.bin",
        size: "466 MB",
        description: "Small English-only model (better accuracy, slower)",
    },
    ModelDescriptor {
        name: "small",
        url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
        file: "small.bin",
        size: "466 MB",
        description: "Small multilingual model",
    },
];

/// Local filenames tried when the pipeline needs a model, best first.
/// This is a curated preference list, not a size ordering.
pub const MODEL_PREFERENCE: &[&str] = &[
    "base.en.bin",
    "base.bin",
    "tiny.en.bin",
    "tiny.bin",
    "small.en.bin",
];

/// Look up a catalog entry by its short name.
pub fn find_model(name: &str) -> Option<&'static ModelDescriptor> {
    MODEL_CATALOG.iter().find(|m| m.name == name)
}

/// Find the first locally available model file in preference order.
pub fn locate_model(models_dir: &Path) -> Option<PathBuf> {
    for filename in MODEL_PREFERENCE {
        let path = models_dir.join(filename);
        if path.exists() {
            debug!("Using model file {}", path.display());
            return Some(path);
        }
    }
    None
}

/// Stream a model file to disk.
///
/// The progress callback receives (bytes downloaded, total bytes); the
/// total is zero when the server sends no Content-Length. On any failure
/// the partial file is removed before the error propagates.
pub async fn download_model<F>(
    model: &ModelDescriptor,
    models_dir: &Path,
    mut on_progress: F,
) -> Result<PathBuf>
where
    F: FnMut(u64, u64),
{
    tokio::fs::create_dir_all(models_dir).await?;
    let output_path = models_dir.join(model.file);

    info!("Downloading {} from {}", model.name, model.url);

    let result = async {
        let response = reqwest::get(model.url).await?;
        if !response.status().is_success() {
            return Err(ClipError::Download(format!(
                "HTTP error! status: {}",
                response.status()
            )));
        }

        let total_bytes = response.content_length().unwrap_or(0);
        let mut stream = response.bytes_stream();
        let mut file = tokio::fs::File::create(&output_path).await?;
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            file.write_all(&bytes).await?;
            downloaded += bytes.len() as u64;
            on_progress(downloaded, total_bytes);
        }

        file.flush().await?;
        Ok(())
    }
    .await;

    if let Err(e) = result {
        let _ = tokio::fs::remove_file(&output_path).await;
        return Err(e);
    }

    Ok(output_path)
}
