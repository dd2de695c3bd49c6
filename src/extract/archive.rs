//! Archive download and extraction
//!
//! Fetches the resolved file into a scoped temp file, classifies it by
//! extension and unpacks whitelisted subtitle members into a flat
//! destination directory. Zip member names arrive in GBK (the catalog's
//! legacy encoding) and are decoded before the output name is computed.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use encoding_rs::GBK;
use thiserror::Error;
use walkdir::WalkDir;

use crate::extract::unrar::{RarTool, SystemRarTool};
use crate::models::{is_subtitle_path, DownloadDescriptor};

/// Errors from fetching or unpacking an archive
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("download failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("{0} not found")]
    ToolMissing(String),

    #[error("bad archive: {0}")]
    Format(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Downloads an archive and writes its subtitle members to disk
pub struct ArchiveExtractor {
    client: reqwest::Client,
    tool: Box<dyn RarTool>,
}

impl ArchiveExtractor {
    /// Create an extractor using the system `unrar`
    pub fn new() -> Self {
        Self::with_tool(Box::new(SystemRarTool::default()))
    }

    /// Create an extractor with a specific RAR tool (override or fake)
    pub fn with_tool(tool: Box<dyn RarTool>) -> Self {
        Self {
            client: reqwest::Client::new(),
            tool,
        }
    }

    /// Fetch the descriptor's file and extract subtitle members into
    /// `dest`, returning the paths written.
    ///
    /// Extensions other than `.rar` and `.zip` (exact match) are a
    /// silent no-op. Zero matching members is success, not an error.
    pub async fn extract(
        &self,
        descriptor: &DownloadDescriptor,
        dest: &Path,
    ) -> Result<Vec<PathBuf>, ExtractError> {
        let response = self
            .client
            .get(&descriptor.url)
            .send()
            .await?
            .error_for_status()?;
        let content = response.bytes().await?;

        // NamedTempFile is removed on drop, on every exit path below
        let mut archive = tempfile::NamedTempFile::new()?;
        archive.write_all(&content)?;
        archive.flush()?;

        match descriptor.extension.as_str() {
            ".rar" => self.extract_rar(archive.path(), dest),
            ".zip" => self.extract_zip(archive.path(), dest),
            _ => Ok(Vec::new()),
        }
    }

    /// Unpack a rar archive via the external tool, then move whitelisted
    /// files out of the scratch directory into `dest`.
    fn extract_rar(&self, archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        if self.tool.locate().is_none() {
            return Err(ExtractError::ToolMissing(self.tool.name().to_string()));
        }

        // TempDir is removed on drop whether or not the walk succeeds
        let scratch = tempfile::tempdir()?;
        self.tool.extract(archive, scratch.path())?;

        let mut written = Vec::new();
        for entry in WalkDir::new(scratch.path()) {
            let entry = entry.map_err(|e| ExtractError::Io(e.into()))?;
            if !entry.file_type().is_file() || !is_subtitle_path(entry.path()) {
                continue;
            }
            let target = dest.join(entry.file_name());
            // Move, not copy; a failed rename aborts the walk
            fs::rename(entry.path(), &target)?;
            written.push(target);
        }
        Ok(written)
    }

    /// Unpack whitelisted zip members, decoding member names from GBK.
    ///
    /// A read or write failure on one member aborts the extraction;
    /// members already written stay in place.
    fn extract_zip(&self, archive: &Path, dest: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let file = File::open(archive)?;
        let mut zip = zip::ZipArchive::new(file)?;

        let mut written = Vec::new();
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            let decoded = decode_member_name(entry.name_raw());
            if !is_subtitle_path(&decoded) {
                continue;
            }
            if !entry.is_file() {
                continue;
            }

            // Flat destination: only the base name survives
            let Some(base_name) = Path::new(&decoded).file_name() else {
                continue;
            };
            let target = dest.join(base_name);

            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            fs::write(&target, &content)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&target, fs::Permissions::from_mode(0o666))?;
            }
            written.push(target);
        }
        Ok(written)
    }
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a zip member name from the catalog's legacy GBK encoding.
/// Undecodable bytes become replacement characters rather than errors.
fn decode_member_name(raw: &[u8]) -> String {
    let (decoded, _, _) = GBK.decode(raw);
    decoded.into_owned()
}
