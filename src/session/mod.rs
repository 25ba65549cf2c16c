//! One-shot download sessions with a scoped temporary workspace.
//!
//! A session owns the whole lifecycle of a single request: workspace
//! creation, option resolution, engine invocation, artifact pickup, and
//! unconditional workspace teardown. Each call gets a fresh workspace and
//! fresh options, so independent sessions are safe to run concurrently
//! without any shared state.

use crate::extractor::models::VideoMetadata;
use crate::extractor::traits::ExtractionEngine;
use crate::platform::Platform;
use crate::resolver::{self, MediaFormat, Quality};
use crate::utils::error::VidloaderError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Extensions the session recognizes as a finished media artifact
const MEDIA_EXTENSIONS: [&str; 6] = ["mp4", "mp3", "webm", "mkv", "avi", "mov"];

/// One download request; immutable once constructed, one attempt per request
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub platform: Platform,
    pub quality: Quality,
    pub format: MediaFormat,
}

impl DownloadRequest {
    /// Classify `url` and bundle it with the requested quality and format
    pub fn new(url: impl Into<String>, quality: Quality, format: MediaFormat) -> Self {
        let url = url.into();
        let platform = Platform::classify(&url);
        Self {
            url,
            platform,
            quality,
            format,
        }
    }
}

/// A downloaded file with its bytes copied out of the session workspace.
///
/// The workspace directory is gone by the time callers see this value, so
/// it carries the bytes themselves rather than a path into the workspace.
#[derive(Clone)]
pub struct MaterializedFile {
    pub file_name: String,
    pub size_bytes: u64,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for MaterializedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterializedFile")
            .field("file_name", &self.file_name)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

/// Result of one session run
#[derive(Debug)]
pub enum DownloadOutcome {
    Success(MaterializedFile, VideoMetadata),
    Failure(VidloaderError),
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success(..))
    }
}

/// Orchestrates one download request end-to-end
pub struct DownloadSession {
    engine: Arc<dyn ExtractionEngine>,
}

impl DownloadSession {
    pub fn new(engine: Arc<dyn ExtractionEngine>) -> Self {
        Self { engine }
    }

    /// Run one request to completion.
    ///
    /// Never panics across this boundary and never leaves the workspace
    /// behind: the temporary directory is removed on every exit path,
    /// including a fault unwinding out of the engine call (via the
    /// [`TempDir`] drop guard).
    pub async fn run(&self, request: &DownloadRequest) -> DownloadOutcome {
        if !request.platform.is_supported() {
            return DownloadOutcome::Failure(VidloaderError::UnsupportedUrl(request.url.clone()));
        }

        let workspace = match TempDir::new() {
            Ok(dir) => dir,
            Err(e) => return DownloadOutcome::Failure(VidloaderError::Io(e)),
        };
        debug!(path = %workspace.path().display(), "Session workspace created");

        let result = self.materialize(request, workspace.path()).await;

        // The outcome is already determined; a failed removal must not
        // overwrite it. Best-effort only.
        if let Err(e) = workspace.close() {
            warn!("Workspace cleanup failed: {e}");
        }

        match result {
            Ok((file, metadata)) => DownloadOutcome::Success(file, metadata),
            Err(e) => DownloadOutcome::Failure(e),
        }
    }

    async fn materialize(
        &self,
        request: &DownloadRequest,
        workspace: &Path,
    ) -> Result<(MaterializedFile, VideoMetadata), VidloaderError> {
        let options = resolver::resolve(request.platform, request.format, request.quality);

        info!(
            engine = self.engine.id(),
            url = %request.url,
            platform = %request.platform,
            "Starting download"
        );
        let metadata = self
            .engine
            .fetch_and_materialize(&request.url, &options, workspace)
            .await?;

        let path = find_media_file(workspace, request.format)
            .await?
            .ok_or(VidloaderError::NoMediaFile)?;

        // Copy the bytes out before the workspace is torn down.
        let data = tokio::fs::read(&path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "download".to_string());
        let size_bytes = data.len() as u64;

        info!(file = %file_name, size_bytes, "Download materialized");
        Ok((
            MaterializedFile {
                file_name,
                size_bytes,
                data,
            },
            metadata,
        ))
    }
}

/// Pick the produced artifact out of the workspace.
///
/// Only recognized media extensions count. Post-processing can leave the raw
/// stream next to the final file (e.g. a `.webm` beside the transcoded
/// `.mp3`), so a file matching the requested format's extension is preferred;
/// otherwise the lexicographically first recognized file keeps the choice
/// deterministic.
async fn find_media_file(
    dir: &Path,
    format: MediaFormat,
) -> Result<Option<PathBuf>, VidloaderError> {
    let mut recognized: Vec<(String, PathBuf)> = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        if let Some(ext) = ext {
            if MEDIA_EXTENSIONS.contains(&ext.as_str()) {
                recognized.push((ext, path));
            }
        }
    }
    recognized.sort_by(|a, b| a.1.cmp(&b.1));

    if let Some((_, path)) = recognized
        .iter()
        .find(|(ext, _)| ext == format.extension())
    {
        return Ok(Some(path.clone()));
    }
    Ok(recognized.into_iter().next().map(|(_, path)| path))
}
