//! CLI Command Handlers
//!
//! Implements the CLI commands by calling into the acquisition
//! pipeline. Each handler takes CLI args and Output, returns ExitCode.

use crate::cli::{DownloadCmd, ExitCode, GuessCmd, Output, SearchCmd};
use crate::config::Config;
use crate::extract::ExtractError;
use crate::grab::Grabber;

// =============================================================================
// Guess Command
// =============================================================================

pub fn guess_cmd(cmd: GuessCmd, output: &Output) -> ExitCode {
    let grabber = Grabber::from_config(&Config::load());
    let candidates = grabber.guess(&cmd.file);

    if let Err(e) = output.print(&candidates) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, output: &Output) -> ExitCode {
    let grabber = Grabber::from_config(&Config::load());

    output.info(format!("Searching for: {}", cmd.keyword));

    match grabber.search(&cmd.keyword).await {
        Ok(mut results) => {
            results.truncate(cmd.limit);

            if results.is_empty() {
                return output.error("No matching subtitles found", ExitCode::NoResults);
            }
            if let Err(e) = output.print(&results) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Search failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Download Command
// =============================================================================

pub async fn download_cmd(cmd: DownloadCmd, output: &Output) -> ExitCode {
    let config = Config::load();
    let grabber = Grabber::from_config(&config);
    let dest = cmd.dest.unwrap_or_else(|| config.destination_or_temp());

    output.info(format!("Downloading listing {} to {}", cmd.id, dest.display()));

    match grabber.download(&cmd.id, &dest).await {
        Ok(written) => {
            if written.is_empty() {
                output.info("No subtitle files in this listing");
            }
            if let Err(e) = output.print(&written) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => {
            let code = download_exit_code(&e);
            output.error(format!("Download failed: {}", e), code)
        }
    }
}

/// Map a download failure to its exit code: transport failures (either
/// the ajax resolution or the file fetch) are network errors, anything
/// from the archive itself is an extraction failure.
fn download_exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<ExtractError>() {
        Some(ExtractError::Remote(_)) | None => ExitCode::NetworkError,
        Some(_) => ExitCode::ExtractFailed,
    }
}
