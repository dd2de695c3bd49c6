//! Data models for subgrab
//!
//! Shared types produced by the catalog client and consumed by the
//! extractor and the CLI.

use serde::{Deserialize, Serialize};
use std::path::Path;

// =============================================================================
// Subtitle whitelist
// =============================================================================

/// File extensions that count as subtitle files.
///
/// Only members of this set are ever written to the destination directory.
pub const SUBTITLE_EXTENSIONS: [&str; 4] = ["ass", "srt", "sub", "idx"];

/// Check whether a path carries a whitelisted subtitle extension
/// (case-insensitive).
pub fn is_subtitle_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SUBTITLE_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
        .unwrap_or(false)
}

// =============================================================================
// Search Results
// =============================================================================

/// One subtitle listing from the catalog's search page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Opaque remote key (final path segment of the listing link)
    pub id: String,
    /// Listing title as shown on the search page
    pub title: String,
    /// Language labels in document order (not deduplicated)
    pub languages: Vec<String>,
}

impl SearchResult {
    /// Comma-joined languages for text presentation
    pub fn languages_joined(&self) -> String {
        self.languages.join(",")
    }
}

// =============================================================================
// Download Descriptor
// =============================================================================

/// Resolved download location for a search result, used once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadDescriptor {
    /// Direct URL of the archive/file, empty when the catalog had no file
    pub url: String,
    /// Extension taken from the URL path, dot included (e.g. ".zip"),
    /// empty when the path has none
    pub extension: String,
}

impl DownloadDescriptor {
    /// Build a descriptor from a resolved URL, deriving the extension
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let extension = Path::new(&url)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        Self { url, extension }
    }

    /// True when resolution produced no file
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}
