//! Per-platform option resolution for the extraction engine.
//!
//! All platform-conditional configuration lives here and in
//! [`crate::platform`]; calling layers hold a [`Platform`] value and never
//! branch on it themselves. [`resolve`] is total over its input domain, so
//! every valid combination is enumerable in tests.

use crate::platform::Platform;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Desktop browser identification for platforms that reject default clients
const DESKTOP_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Target bitrate for audio transcodes
const MP3_BITRATE_KBPS: u32 = 192;

/// Requested video quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Quality {
    #[serde(rename = "best")]
    #[value(name = "best")]
    Best,
    #[serde(rename = "1080")]
    #[value(name = "1080")]
    P1080,
    #[serde(rename = "720")]
    #[value(name = "720")]
    P720,
    #[serde(rename = "480")]
    #[value(name = "480")]
    P480,
    #[serde(rename = "360")]
    #[value(name = "360")]
    P360,
    #[serde(rename = "240")]
    #[value(name = "240")]
    P240,
    #[serde(rename = "144")]
    #[value(name = "144")]
    P144,
}

impl Quality {
    /// Vertical resolution cap for format selection, `None` for best-available
    pub fn height_cap(&self) -> Option<u32> {
        match self {
            Quality::Best => None,
            Quality::P1080 => Some(1080),
            Quality::P720 => Some(720),
            Quality::P480 => Some(480),
            Quality::P360 => Some(360),
            Quality::P240 => Some(240),
            Quality::P144 => Some(144),
        }
    }
}

/// Target format for the materialized file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    /// Video container
    Mp4,
    /// Audio only, transcoded after download
    Mp3,
}

impl MediaFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Mp3 => "mp3",
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, MediaFormat::Mp3)
    }
}

/// Post-processing directive: transcode the downloaded stream to an audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTranscode {
    pub codec: &'static str,
    pub bitrate_kbps: u32,
}

/// Configuration handed to the extraction engine for one request.
///
/// Built fresh per request by [`resolve`]; never shared or mutated across
/// sessions, so concurrent downloads cannot leak options into each other.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorOptions {
    /// Suppress verbose engine logging
    pub quiet: bool,
    /// Suppress non-fatal engine warnings
    pub no_warnings: bool,
    /// Extra HTTP headers as (name, value) pairs
    pub http_headers: Vec<(String, String)>,
    /// Extractor-specific arguments in `extractor:key` form
    pub extractor_args: Vec<String>,
    /// Format-selector expression with fallback alternatives
    pub format_selector: String,
    /// Output naming template, rooted at a session-owned directory by the
    /// engine adapter. Interpolates the source title and detected extension
    /// so concurrent sessions never collide on a fixed filename.
    pub output_template: String,
    /// Audio transcode to run after download, for audio-only requests
    pub audio_transcode: Option<AudioTranscode>,
}

/// Build engine options for one request.
///
/// Total function: every (platform, format, quality) combination yields a
/// valid configuration, including [`Platform::Unknown`] (which callers are
/// expected to reject before getting here).
pub fn resolve(platform: Platform, format: MediaFormat, quality: Quality) -> ExtractorOptions {
    let mut http_headers = Vec::new();
    let mut extractor_args = Vec::new();

    match platform {
        // Facebook's DASH manifest probe is slow and failure-prone; skip it.
        Platform::Facebook => {
            extractor_args.push("facebook:skip_dash_manifest".to_string());
        }
        // LinkedIn's playback endpoint rejects default client identification.
        Platform::Linkedin => {
            http_headers.push(("User-Agent".to_string(), DESKTOP_USER_AGENT.to_string()));
        }
        Platform::Youtube | Platform::Unknown => {}
    }

    let (format_selector, audio_transcode) = if format.is_audio() {
        (
            "bestaudio/best".to_string(),
            Some(AudioTranscode {
                codec: "mp3",
                bitrate_kbps: MP3_BITRATE_KBPS,
            }),
        )
    } else {
        (video_selector(platform, quality), None)
    };

    ExtractorOptions {
        quiet: true,
        no_warnings: true,
        http_headers,
        extractor_args,
        format_selector,
        output_template: "%(title)s.%(ext)s".to_string(),
        audio_transcode,
    }
}

/// Derive the video-branch format selector.
///
/// YouTube prefers MP4 with a three-level fallback; Facebook caps on height
/// only; LinkedIn rarely exposes multiple renditions, so the quality tier is
/// ignored there.
fn video_selector(platform: Platform, quality: Quality) -> String {
    match (platform, quality.height_cap()) {
        (Platform::Youtube, None) => "best[ext=mp4]/best".to_string(),
        (Platform::Youtube, Some(h)) => format!(
            "best[height<={h}][ext=mp4]/best[height<={h}]/best[ext=mp4]/best"
        ),
        (Platform::Linkedin, _) => "best".to_string(),
        (Platform::Facebook | Platform::Unknown, None) => "best".to_string(),
        (Platform::Facebook | Platform::Unknown, Some(h)) => format!("best[height<={h}]/best"),
    }
}
