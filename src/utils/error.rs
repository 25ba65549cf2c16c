//! Error handling for Vidloader

use thiserror::Error;

/// Main error type for Vidloader.
///
/// Engine-reported failures ([`Metadata`](VidloaderError::Metadata),
/// [`Extraction`](VidloaderError::Extraction)) carry the engine's message
/// verbatim so callers can show or match on it without the core
/// reinterpreting an evolving set of platform failures.
#[derive(Debug, Error)]
pub enum VidloaderError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    EngineNotFound,

    #[error("Unsupported platform URL: {0}")]
    UnsupportedUrl(String),

    #[error("Failed to fetch video info: {0}")]
    Metadata(String),

    #[error("Download failed: {0}")]
    Extraction(String),

    /// The engine reported success but left no recognized media file behind
    #[error("No file found after download")]
    NoMediaFile,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
