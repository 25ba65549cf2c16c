//! yt-dlp adapter implementing [`ExtractionEngine`].
//!
//! Maps [`ExtractorOptions`] onto yt-dlp CLI flags and surfaces engine
//! failures verbatim. Binary discovery checks the system PATH first, then
//! common installation locations.

use crate::extractor::models::VideoMetadata;
use crate::extractor::traits::ExtractionEngine;
use crate::resolver::ExtractorOptions;
use crate::utils::error::VidloaderError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info};

/// Extraction engine backed by the yt-dlp binary
pub struct YtDlpEngine {
    binary: PathBuf,
}

impl YtDlpEngine {
    /// Locate yt-dlp and build the engine; fails when the binary is missing
    pub fn new() -> Result<Self, VidloaderError> {
        let binary = find_ytdlp().ok_or(VidloaderError::EngineNotFound)?;
        info!("Found yt-dlp at: {}", binary.display());
        Ok(Self { binary })
    }

    /// Use an explicit yt-dlp binary path, skipping discovery
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn base_args(options: &ExtractorOptions) -> Vec<String> {
        let mut args = Vec::new();
        if options.quiet {
            args.push("--quiet".to_string());
        }
        if options.no_warnings {
            args.push("--no-warnings".to_string());
        }
        for (name, value) in &options.http_headers {
            args.push("--add-header".to_string());
            args.push(format!("{name}:{value}"));
        }
        for extractor_arg in &options.extractor_args {
            args.push("--extractor-args".to_string());
            args.push(extractor_arg.clone());
        }
        args
    }

    fn metadata_args(options: &ExtractorOptions) -> Vec<String> {
        let mut args = Self::base_args(options);
        args.push("--dump-json".to_string());
        args.push("--no-download".to_string());
        args.push("--no-playlist".to_string());
        args
    }

    fn download_args(options: &ExtractorOptions, dest_dir: &Path) -> Vec<String> {
        let mut args = Self::base_args(options);
        // --print-json emits the info JSON after the download, so one
        // invocation yields both the file and the metadata.
        args.push("--print-json".to_string());
        args.push("--no-playlist".to_string());
        args.push("-f".to_string());
        args.push(options.format_selector.clone());
        args.push("-o".to_string());
        args.push(
            dest_dir
                .join(&options.output_template)
                .to_string_lossy()
                .into_owned(),
        );
        if let Some(transcode) = &options.audio_transcode {
            args.push("-x".to_string());
            args.push("--audio-format".to_string());
            args.push(transcode.codec.to_string());
            args.push("--audio-quality".to_string());
            args.push(format!("{}K", transcode.bitrate_kbps));
        }
        args
    }

    async fn invoke(&self, args: &[String], url: &str) -> Result<Output, VidloaderError> {
        debug!(url = %url, "Invoking yt-dlp");
        let output = AsyncCommand::new(&self.binary)
            .args(args)
            .arg(url)
            .output()
            .await?;
        Ok(output)
    }
}

#[async_trait]
impl ExtractionEngine for YtDlpEngine {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch_metadata(
        &self,
        url: &str,
        options: &ExtractorOptions,
    ) -> Result<VideoMetadata, VidloaderError> {
        let args = Self::metadata_args(options);
        let output = self.invoke(&args, url).await?;

        if !output.status.success() {
            let reason = failure_reason(&output);
            error!(url = %url, "yt-dlp metadata fetch failed: {reason}");
            return Err(VidloaderError::Metadata(reason));
        }

        parse_metadata(&output.stdout)
    }

    async fn fetch_and_materialize(
        &self,
        url: &str,
        options: &ExtractorOptions,
        dest_dir: &Path,
    ) -> Result<VideoMetadata, VidloaderError> {
        let args = Self::download_args(options, dest_dir);
        let output = self.invoke(&args, url).await?;

        if !output.status.success() {
            let reason = failure_reason(&output);
            error!(url = %url, "yt-dlp download failed: {reason}");
            return Err(VidloaderError::Extraction(reason));
        }

        parse_metadata(&output.stdout)
    }
}

/// Engine stderr, trimmed but otherwise verbatim; falls back to the exit
/// status when the engine died silently.
fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("yt-dlp exited with {}", output.status)
    } else {
        stderr
    }
}

/// Parse the info JSON out of engine stdout.
///
/// In download mode stdout may carry progress noise before the JSON
/// document; the info record is the last line starting with '{'.
fn parse_metadata(stdout: &[u8]) -> Result<VideoMetadata, VidloaderError> {
    let text = String::from_utf8_lossy(stdout);
    let json_line = text
        .lines()
        .rev()
        .find(|line| line.trim_start().starts_with('{'))
        .unwrap_or_else(|| text.trim());
    let metadata = serde_json::from_str(json_line)?;
    Ok(metadata)
}

/// Locate the yt-dlp binary: system PATH first, then common install paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(path) = which::which("yt-dlp") {
        return Some(path);
    }

    let mut candidates = vec![
        PathBuf::from("/opt/homebrew/bin/yt-dlp"),
        PathBuf::from("/usr/local/bin/yt-dlp"),
        PathBuf::from("/usr/bin/yt-dlp"),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local/bin/yt-dlp"));
    }

    candidates.into_iter().find(|path| path.is_file())
}
