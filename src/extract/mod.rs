//! Archive fetch and extraction

pub mod archive;
pub mod unrar;

pub use archive::{ArchiveExtractor, ExtractError};
pub use unrar::{RarTool, SystemRarTool};
