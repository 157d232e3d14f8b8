use clap::{Arg, Command};
use std::path::PathBuf;

use clip_inspector::video::format_duration_seconds;
use clip_inspector::VideoProcessor;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("clip_inspector=warn")
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("clip-duration")
        .version("0.1.0")
        .about("Report the duration of a media file in seconds")
        .arg(
            Arg::new("video")
                .value_name("VIDEO")
                .help("Path to the video file")
                .required(true),
        )
        .get_matches();

    let video_path = PathBuf::from(matches.get_one::<String>("video").unwrap());

    let processor = VideoProcessor::new();
    match processor.probe_duration(&video_path).await {
        Ok(duration) => println!("{}", format_duration_seconds(duration)),
        Err(e) => {
            eprintln!("Error getting video duration: {}", e);
            std::process::exit(1);
        }
    }
}
