use anyhow::Result;
use clap::{Arg, ArgGroup, Command};
use std::path::PathBuf;
use tracing::{error, info};

use video_transcriber::{Config, Transcriber};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("video-transcriber")
        .version("0.1.0")
        .about("Batch-transcribe video recordings to timestamped text")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .help("Transcribe exactly one video file"),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .help("Scan the root directory and transcribe every unprocessed recording")
                .action(clap::ArgAction::SetTrue),
        )
        .group(ArgGroup::new("mode").args(["file", "all"]).required(true))
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Directory scanned in batch mode (overrides configuration)"),
        )
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("NUM")
                .help("Batch worker pool size (overrides configuration)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Initialize logging
    if matches.get_flag("verbose") {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt().with_env_filter("info").init();
    }

    // Load configuration and apply CLI overrides
    let mut config = Config::load();
    if let Some(root) = matches.get_one::<String>("root") {
        config.root_dir = PathBuf::from(root);
    }
    if let Some(workers) = matches.get_one::<String>("workers") {
        config.workers = workers.parse()?;
    }
    config.validate()?;

    let transcriber = Transcriber::new(config.clone());

    if let Some(file) = matches.get_one::<String>("file") {
        let input = PathBuf::from(file);
        if !input.is_file() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let output = transcriber.transcribe_file(&input).await?;
        info!("🎉 Done: {}", output.display());
        return Ok(());
    }

    // Batch mode
    if !config.root_dir.is_dir() {
        anyhow::bail!("Root directory does not exist: {}", config.root_dir.display());
    }

    info!("🚀 Scanning {} for unprocessed recordings", config.root_dir.display());
    let report = transcriber.transcribe_all().await?;

    info!(
        "🎉 Batch complete: {} total, {} succeeded, {} failed",
        report.total, report.succeeded, report.failed
    );
    for outcome in report.outcomes.iter().filter(|o| !o.succeeded()) {
        error!(
            "{}: {}",
            outcome.input.display(),
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }

    if report.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
