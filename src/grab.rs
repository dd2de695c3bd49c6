//! Acquisition pipeline
//!
//! Thin orchestrator over the guesser, the catalog client and the
//! archive extractor. The presentation layer calls exactly three entry
//! points: `guess`, `search` and `download`; errors from the pipeline
//! are forwarded verbatim, nothing here retries or recovers.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::api::CatalogClient;
use crate::config::Config;
use crate::extract::{ArchiveExtractor, SystemRarTool};
use crate::guess;
use crate::models::SearchResult;

/// Subtitle acquisition pipeline
pub struct Grabber {
    catalog: CatalogClient,
    extractor: ArchiveExtractor,
}

impl Grabber {
    /// Create a grabber against the default catalog and system unrar
    pub fn new() -> Self {
        Self {
            catalog: CatalogClient::new(),
            extractor: ArchiveExtractor::new(),
        }
    }

    /// Create a grabber from configuration (catalog base URL and RAR
    /// tool overrides)
    pub fn from_config(config: &Config) -> Self {
        let catalog = match config.catalog_url.as_deref() {
            Some(base) => CatalogClient::with_base_url(base),
            None => CatalogClient::new(),
        };
        let extractor =
            ArchiveExtractor::with_tool(Box::new(SystemRarTool::new(config.rar_tool())));
        Self { catalog, extractor }
    }

    /// Create a grabber from explicit parts (for testing)
    pub fn with_parts(catalog: CatalogClient, extractor: ArchiveExtractor) -> Self {
        Self { catalog, extractor }
    }

    /// Keyword candidates for a media filename, most specific first
    pub fn guess(&self, filename: &str) -> Vec<String> {
        guess::guess_names(filename)
    }

    /// Search the catalog for listings matching a keyword
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        self.catalog.search(keyword).await
    }

    /// Resolve a listing id and extract its archive into `dest`.
    ///
    /// Returns the subtitle files written. An empty resolution ("no
    /// file" from the catalog) yields zero files, not an error.
    pub async fn download(&self, id: &str, dest: &Path) -> Result<Vec<PathBuf>> {
        let descriptor = self.catalog.resolve(id).await?;
        if descriptor.is_empty() {
            return Ok(Vec::new());
        }
        let written = self.extractor.extract(&descriptor, dest).await?;
        Ok(written)
    }
}

impl Default for Grabber {
    fn default() -> Self {
        Self::new()
    }
}
