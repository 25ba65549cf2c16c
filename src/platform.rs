//! Platform detection for supported video sites.

use std::fmt;

/// Domain substrings per platform, in resolution order.
///
/// Classification walks this table top to bottom and the first match wins,
/// so any overlap between domain lists would be resolved by declaration
/// order, not by the most specific domain.
const PLATFORM_DOMAINS: &[(Platform, &[&str])] = &[
    (Platform::Youtube, &["youtube.com", "youtu.be"]),
    (Platform::Facebook, &["facebook.com", "fb.com", "fb.watch"]),
    (Platform::Linkedin, &["linkedin.com"]),
];

/// A video platform the downloader knows how to configure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Youtube,
    Facebook,
    Linkedin,
    Unknown,
}

impl Platform {
    /// Detect which platform a URL belongs to.
    ///
    /// Pure substring match against [`PLATFORM_DOMAINS`], case-insensitive.
    /// Empty input and unrecognized hosts map to [`Platform::Unknown`].
    pub fn classify(url: &str) -> Platform {
        if url.is_empty() {
            return Platform::Unknown;
        }

        let url_lower = url.to_lowercase();
        for (platform, domains) in PLATFORM_DOMAINS {
            if domains.iter().any(|domain| url_lower.contains(domain)) {
                return *platform;
            }
        }
        Platform::Unknown
    }

    /// Whether download/info actions may be attempted for this platform
    pub fn is_supported(&self) -> bool {
        !matches!(self, Platform::Unknown)
    }

    /// Human-readable label for the calling layer
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube",
            Platform::Facebook => "Facebook",
            Platform::Linkedin => "LinkedIn",
            Platform::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
