use clap::{Arg, Command};
use std::io::Write;
use tracing::warn;

use clip_inspector::transcription::models::{self, MODEL_CATALOG};
use clip_inspector::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("clip_inspector=warn")
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("clip-models")
        .version("0.1.0")
        .about("Download whisper model weight files")
        .arg(
            Arg::new("model")
                .value_name("MODEL")
                .help("Catalog name of the model to download (e.g. base.en)"),
        )
        .get_matches();

    let Some(model_name) = matches.get_one::<String>("model") else {
        println!("Whisper Model Downloader");
        println!("========================\n");
        println!("Available models:");
        print_catalog();
        println!("\nUsage: clip-models <model-name>");
        println!("Example: clip-models base.en");
        return;
    };

    let Some(model) = models::find_model(model_name) else {
        eprintln!("Unknown model: {}", model_name);
        println!("\nAvailable models:");
        print_catalog();
        std::process::exit(1);
    };

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let models_dir = &config.models.models_dir;

    if let Err(e) = tokio::fs::create_dir_all(models_dir).await {
        eprintln!("Cannot create models directory: {}", e);
        std::process::exit(1);
    }

    let output_path = models_dir.join(model.file);

    // Ask before clobbering an existing download
    if output_path.exists() {
        println!(
            "Model {} already exists at: {}",
            model.name,
            output_path.display()
        );
        if !confirm("Overwrite? (y/N): ") {
            println!("Download cancelled.");
            return;
        }
    }

    println!("Downloading {} model ({})...", model.name, model.size);
    println!("URL: {}", model.url);
    println!("Destination: {}\n", output_path.display());

    let mut last_percent = u64::MAX;
    let result = models::download_model(model, models_dir, |downloaded, total| {
        if total > 0 {
            let percent = downloaded * 100 / total;
            if percent != last_percent {
                print!(
                    "\rProgress: {}% ({}MB / {}MB)",
                    percent,
                    downloaded / 1024 / 1024,
                    total / 1024 / 1024
                );
                std::io::stdout().flush().ok();
                last_percent = percent;
            }
        } else {
            print!("\rDownloaded {}MB", downloaded / 1024 / 1024);
            std::io::stdout().flush().ok();
        }
    })
    .await;

    match result {
        Ok(path) => {
            println!("\n\nDownload complete!");
            println!("Model saved to: {}", path.display());
        }
        Err(e) => {
            eprintln!("\nDownload failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_catalog() {
    for model in MODEL_CATALOG {
        println!("  {:<10} - {} ({})", model.name, model.description, model.size);
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{}", prompt);
    std::io::stdout().flush().ok();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("y")
}
