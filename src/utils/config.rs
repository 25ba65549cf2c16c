//! Application configuration

use crate::resolver::{MediaFormat, Quality};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Defaults applied when the caller leaves quality/format/destination unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Where downloaded files are persisted
    pub download_location: PathBuf,

    /// Preferred video quality
    pub quality: Quality,

    /// Preferred output format
    pub format: MediaFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: dirs::download_dir().unwrap_or_else(|| PathBuf::from("./downloads")),
            quality: Quality::P720,
            format: MediaFormat::Mp4,
        }
    }
}
