use crate::extractor::models::VideoMetadata;
use crate::resolver::ExtractorOptions;
use crate::utils::error::VidloaderError;
use async_trait::async_trait;
use std::path::Path;

/// Seam between the orchestration core and the external extraction engine.
///
/// Implemented by the yt-dlp adapter in production and by scripted fakes in
/// tests, so session behavior is exercisable without network access.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Identifier for logging (e.g. "yt-dlp")
    fn id(&self) -> &'static str;

    /// Fetch metadata without downloading anything.
    ///
    /// Failures carry the engine's own error message verbatim; the engine
    /// covers a large and evolving space of platform failures (geo-block,
    /// private video, removed video, rate limiting) that the core does not
    /// reinterpret.
    async fn fetch_metadata(
        &self,
        url: &str,
        options: &ExtractorOptions,
    ) -> Result<VideoMetadata, VidloaderError>;

    /// Download into `dest_dir` and report the resulting metadata.
    ///
    /// Implementations must never write outside `dest_dir`. One engine
    /// invocation per call; retries are a caller-level policy.
    async fn fetch_and_materialize(
        &self,
        url: &str,
        options: &ExtractorOptions,
        dest_dir: &Path,
    ) -> Result<VideoMetadata, VidloaderError>;
}
