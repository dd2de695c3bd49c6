//! Configuration management for subgrab
//!
//! Config is read from ~/.config/subgrab/config.toml and never written
//! back; the file is user-maintained.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Name or path of the external RAR extraction tool
    pub unrar: Option<String>,
    /// Catalog base URL override
    pub catalog_url: Option<String>,
    /// Default destination directory for downloaded subtitles
    pub destination: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/subgrab/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("subgrab").join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// RAR tool resolution chain:
    /// 1. Environment variable SUBGRAB_UNRAR
    /// 2. Value from config file
    /// 3. Conventional tool name "unrar"
    pub fn rar_tool(&self) -> String {
        if let Ok(tool) = std::env::var("SUBGRAB_UNRAR") {
            return tool;
        }
        self.unrar.clone().unwrap_or_else(|| "unrar".to_string())
    }

    /// Destination fallback: configured value, else the platform temp dir
    pub fn destination_or_temp(&self) -> PathBuf {
        self.destination.clone().unwrap_or_else(std::env::temp_dir)
    }
}
