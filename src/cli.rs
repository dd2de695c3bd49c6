//! CLI - Command Line Interface for subgrab
//!
//! Every pipeline step is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Keyword candidates for a media file
//! subgrab guess "Movie.Name.2020.1080P.BluRay.mkv"
//!
//! # Search the catalog
//! subgrab search "Movie Name" --json
//!
//! # Resolve a listing and extract its subtitles
//! subgrab download 12345 --dest /media/films
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Search produced no results
    NoResults = 4,
    /// Archive extraction failed
    ExtractFailed = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// subgrab - subtitle search and download
#[derive(Parser, Debug)]
#[command(
    name = "subgrab",
    version,
    about = "Search and download subtitles for local media files",
    after_help = "EXAMPLES:\n\
                  subgrab guess Movie.Name.2020.1080P.mkv   Keyword candidates\n\
                  subgrab search \"Movie Name\"               Search the catalog\n\
                  subgrab download 12345 -d /media/films    Download and extract"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Guess search keywords from a media filename
    #[command(visible_alias = "g")]
    Guess(GuessCmd),

    /// Search the catalog for subtitle listings
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Download a listing and extract its subtitle files
    #[command(visible_alias = "d")]
    Download(DownloadCmd),
}

/// Guess search keywords from a media filename
#[derive(Args, Debug)]
pub struct GuessCmd {
    /// Media file path or bare filename
    #[arg(required = true)]
    pub file: String,
}

/// Search the catalog by keyword
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search keyword (try `subgrab guess` output)
    #[arg(required = true)]
    pub keyword: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Download a listing by id and extract its subtitles
#[derive(Args, Debug)]
pub struct DownloadCmd {
    /// Listing id from `subgrab search`
    #[arg(required = true)]
    pub id: String,

    /// Destination directory (default: configured destination, else the
    /// platform temp dir)
    #[arg(long, short = 'd')]
    pub dest: Option<PathBuf>,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}
