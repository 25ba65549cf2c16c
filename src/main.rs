//! Vidloader - Multi-Platform Video Downloader
//!
//! Downloads videos from YouTube, Facebook, and LinkedIn in a chosen
//! quality/format by orchestrating yt-dlp, with a small CLI front end.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use vidloader::{
    resolver, sanitize_filename, AppSettings, DownloadOutcome, DownloadRequest, DownloadSession,
    ExtractionEngine, MediaFormat, Platform, Quality, YtDlpEngine,
};

#[derive(Parser)]
#[command(name = "vidloader", about = "Download videos from YouTube, Facebook, and LinkedIn")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and print video information without downloading
    Info {
        /// Video URL
        url: String,
    },
    /// Download a video and save it locally
    Download {
        /// Video URL
        url: String,
        /// Video quality tier
        #[arg(long, value_enum)]
        quality: Option<Quality>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<MediaFormat>,
        /// Directory to save the file into
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let settings = AppSettings::default();

    match args.command {
        Command::Info { url } => info(&url).await,
        Command::Download {
            url,
            quality,
            format,
            output_dir,
        } => {
            download(
                &url,
                quality.unwrap_or(settings.quality),
                format.unwrap_or(settings.format),
                output_dir.unwrap_or(settings.download_location),
            )
            .await
        }
    }
}

async fn info(url: &str) -> Result<()> {
    let platform = Platform::classify(url);
    if !platform.is_supported() {
        bail!("Unsupported platform. Please use a YouTube, Facebook, or LinkedIn URL.");
    }
    println!("Detected platform: {}", platform.label());

    let engine = YtDlpEngine::new()?;
    let options = resolver::resolve(platform, MediaFormat::Mp4, Quality::Best);
    let metadata = engine.fetch_metadata(url, &options).await?;

    println!("Title:     {}", metadata.title);
    if let Some(uploader) = &metadata.uploader {
        println!("Uploader:  {uploader}");
    }
    println!("Duration:  {}", metadata.format_duration());
    if let Some(date) = metadata.formatted_upload_date() {
        println!("Uploaded:  {date}");
    }
    if let Some(views) = metadata.view_count {
        println!("Views:     {views}");
    }
    let heights = metadata.available_heights();
    if !heights.is_empty() {
        let list = heights
            .iter()
            .map(|h| format!("{h}p"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Available: {list}");
    }
    Ok(())
}

async fn download(
    url: &str,
    quality: Quality,
    format: MediaFormat,
    output_dir: PathBuf,
) -> Result<()> {
    let request = DownloadRequest::new(url, quality, format);
    if !request.platform.is_supported() {
        bail!("Unsupported platform. Please use a YouTube, Facebook, or LinkedIn URL.");
    }
    println!("Downloading from {}...", request.platform.label());

    let engine: Arc<dyn ExtractionEngine> = Arc::new(YtDlpEngine::new()?);
    let session = DownloadSession::new(engine);

    match session.run(&request).await {
        DownloadOutcome::Success(file, metadata) => {
            tokio::fs::create_dir_all(&output_dir).await?;
            let target = output_dir.join(sanitize_filename(&file.file_name));
            tokio::fs::write(&target, &file.data).await?;
            println!(
                "Saved \"{}\" ({:.2} MB) to {}",
                metadata.title,
                file.size_bytes as f64 / 1_048_576.0,
                target.display()
            );
            Ok(())
        }
        DownloadOutcome::Failure(e) => Err(e.into()),
    }
}
