//! Data structures for engine-reported video metadata

use serde::{Deserialize, Serialize};

/// Metadata reported by the extraction engine for one video.
///
/// The engine's JSON carries far more than this; only the fields the core
/// and the calling layer actually read are modeled. Unknown fields are
/// ignored during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub uploader: Option<String>,
    /// Duration in seconds; fractional for some platforms
    #[serde(default)]
    pub duration: Option<f64>,
    /// Upload date as an 8-digit `YYYYMMDD` string
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub formats: Vec<StreamFormat>,
}

/// One stream descriptor from the engine's format list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamFormat {
    #[serde(default)]
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
}

impl StreamFormat {
    /// Whether this descriptor carries an actual video stream
    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref().is_some_and(|codec| codec != "none")
    }
}

impl VideoMetadata {
    /// Duration as a readable string, e.g. "1h 4m 5s" or "3m 21s"
    pub fn format_duration(&self) -> String {
        let total = match self.duration {
            Some(secs) if secs >= 1.0 => secs as u64,
            _ => return "Unknown".to_string(),
        };

        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{hours}h {minutes}m {seconds}s")
        } else if minutes > 0 {
            format!("{minutes}m {seconds}s")
        } else {
            format!("{seconds}s")
        }
    }

    /// Upload date reformatted from `YYYYMMDD` to `YYYY-MM-DD`
    pub fn formatted_upload_date(&self) -> Option<String> {
        let date = self.upload_date.as_deref()?;
        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..]))
    }

    /// Distinct vertical resolutions with a real video codec, highest first
    pub fn available_heights(&self) -> Vec<u32> {
        let mut heights: Vec<u32> = self
            .formats
            .iter()
            .filter(|format| format.has_video())
            .filter_map(|format| format.height)
            .collect();
        heights.sort_unstable_by(|a, b| b.cmp(a));
        heights.dedup();
        heights
    }
}
