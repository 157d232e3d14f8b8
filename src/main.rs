use anyhow::Result;
use clap::{Arg, Command};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use clip_inspector::transcription::{models, transcribe_clip};
use clip_inspector::{AudioExtractor, ClipError, Config, TimeRange, WhisperEngine};

#[tokio::main]
async fn main() {
    // Initialize logging; diagnostics go to stderr, transcript to stdout
    tracing_subscriber::fmt()
        .with_env_filter("clip_inspector=warn")
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("clip-transcribe")
        .version("0.1.0")
        .about("Transcribe speech from a time range of a video file")
        .arg(
            Arg::new("video")
                .value_name("VIDEO")
                .help("Path to the video file")
                .required(true),
        )
        .arg(
            Arg::new("start")
                .value_name("START")
                .help("Range start, in seconds (e.g. \"120\") or MM:SS format (e.g. \"2:00\")")
                .required(true),
        )
        .arg(
            Arg::new("end")
                .value_name("END")
                .help("Range end, in seconds or MM:SS format")
                .required(true),
        )
        .get_matches();

    let video_path = PathBuf::from(matches.get_one::<String>("video").unwrap());
    let start = matches.get_one::<String>("start").unwrap();
    let end = matches.get_one::<String>("end").unwrap();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if let Err(e) = run(&video_path, start, end, &config).await {
        eprintln!("Error transcribing audio: {}", e);
        std::process::exit(1);
    }
}

async fn run(video_path: &Path, start: &str, end: &str, config: &Config) -> Result<()> {
    let range = TimeRange::from_specs(start, end)?;

    // Removed on drop, success or failure
    let temp_dir = tempfile::Builder::new().prefix("clip-audio-").tempdir()?;
    let audio_path = temp_dir.path().join("segment.wav");
    debug!("Working directory: {}", temp_dir.path().display());

    println!("=== AUDIO TRANSCRIPT ===\n");

    let extractor = AudioExtractor::from_config(&config.audio);
    match extractor.extract_segment(video_path, &range, &audio_path).await {
        Ok(()) => {
            let model_path = models::locate_model(&config.models.models_dir).ok_or_else(|| {
                ClipError::ModelNotFound {
                    models_dir: config.models.models_dir.display().to_string(),
                }
            })?;

            let engine = WhisperEngine::new(&model_path)?;
            let transcript = transcribe_clip(&engine, &audio_path, range.start)?;

            println!("{}", transcript);
            println!("\n========================\n");
        }
        Err(ClipError::NoAudioStream) => {
            println!("No audio stream found in video file.");
            println!("\n========================\n");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
