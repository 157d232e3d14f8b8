use anyhow::Result;
use clap::{Arg, Command};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use clip_inspector::frames::{self, FrameConverter};
use clip_inspector::{Config, TimeRange, VideoProcessor};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("clip_inspector=warn")
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("clip-frames")
        .version("0.1.0")
        .about("Extract frames from a time range of a video file")
        .arg(
            Arg::new("video")
                .value_name("VIDEO")
                .help("Path to the video file")
                .required(true),
        )
        .arg(
            Arg::new("start")
                .value_name("START")
                .help("Range start, in seconds or MM:SS format")
                .required(true),
        )
        .arg(
            Arg::new("end")
                .value_name("END")
                .help("Range end, in seconds or MM:SS format")
                .required(true),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .value_name("N")
                .help("Extract exactly N frames, uniformly distributed across the range")
                .value_parser(clap::value_parser!(usize)),
        )
        .get_matches();

    let video_path = PathBuf::from(matches.get_one::<String>("video").unwrap());
    let start = matches.get_one::<String>("start").unwrap();
    let end = matches.get_one::<String>("end").unwrap();
    let count = matches.get_one::<usize>("count").copied();

    if count == Some(0) {
        eprintln!("Error: --count must be a positive integer");
        std::process::exit(1);
    }

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if let Err(e) = run(&video_path, start, end, count, &config).await {
        eprintln!("Error extracting frames: {}", e);
        std::process::exit(1);
    }
}

async fn run(
    video_path: &Path,
    start: &str,
    end: &str,
    count: Option<usize>,
    config: &Config,
) -> Result<()> {
    let range = TimeRange::from_specs(start, end)?;

    // The output directory is kept on disk: on success it holds the
    // converted frames, on failure the partial results for inspection.
    let work_dir = tempfile::Builder::new()
        .prefix("clip-frames-")
        .tempdir()?
        .into_path();
    debug!("Frame directory: {}", work_dir.display());

    let processor = VideoProcessor::new();
    let fps = frames::sampling_rate(&range, count, config.frames.default_fps);
    let mut extracted = processor
        .extract_frames(video_path, &range, fps, &work_dir)
        .await?;

    if extracted.is_empty() {
        eprintln!("No frames extracted. Check video path and time range.");
        std::process::exit(1);
    }

    // Rounding in the sampler can over-produce; drop the tail
    if let Some(n) = count {
        frames::trim_to_count(&mut extracted, n).await?;
    }

    let converter = FrameConverter::from_config(&config.frames);
    let mut outputs = Vec::new();

    for (i, png_path) in extracted.iter().enumerate() {
        let jpeg_path = work_dir.join(format!("frame-{:03}.jpg", i + 1));
        converter.convert(png_path, &jpeg_path)?;
        tokio::fs::remove_file(png_path).await?;
        outputs.push(jpeg_path);
    }

    println!("=== EXTRACTED FRAMES ===\n");
    println!(
        "Extracted {} frames from {}s to {}s:\n",
        outputs.len(),
        range.start,
        range.end
    );

    for (i, path) in outputs.iter().enumerate() {
        let timestamp = frames::frame_timestamp(&range, i, count);
        println!("Frame {} ({:.1}s): {}", i + 1, timestamp, path.display());
    }

    println!("\n========================\n");

    Ok(())
}
