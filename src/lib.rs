//! subgrab - subtitle search and download for local media files
//!
//! Finds subtitles on a SubHD-style catalog and turns the downloaded
//! archive into plain subtitle files on disk.
//!
//! # Modules
//!
//! - `models` - Search results, download descriptors, subtitle whitelist
//! - `guess` - Keyword guessing from noisy release filenames
//! - `api` - Catalog client (HTML search page, ajax download resolution)
//! - `extract` - Archive fetch, rar/zip extraction, GBK name decoding
//! - `grab` - Pipeline orchestrator (guess / search / download)
//! - `cli` / `commands` - Scriptable command-line collaborator

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod extract;
pub mod grab;
pub mod guess;
pub mod models;

// Re-export commonly used types
pub use api::CatalogClient;
pub use extract::{ArchiveExtractor, ExtractError, RarTool, SystemRarTool};
pub use grab::Grabber;
pub use models::{DownloadDescriptor, SearchResult, SUBTITLE_EXTENSIONS};
