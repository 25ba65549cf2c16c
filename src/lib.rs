//! Vidloader library
//!
//! Download-orchestration core for a multi-platform video downloader:
//! platform detection, per-platform extraction options, yt-dlp invocation,
//! and one-shot download sessions with guaranteed temp-file cleanup.

pub mod extractor;
pub mod platform;
pub mod resolver;
pub mod session;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{ExtractionEngine, StreamFormat, VideoMetadata, YtDlpEngine};
pub use platform::Platform;
pub use resolver::{resolve, ExtractorOptions, MediaFormat, Quality};
pub use session::{DownloadOutcome, DownloadRequest, DownloadSession, MaterializedFile};
pub use utils::{sanitize_filename, AppSettings, VidloaderError};
