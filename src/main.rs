//! subgrab - subtitle search and download
//!
//! # Usage
//!
//! ```bash
//! subgrab guess Movie.Name.2020.1080P.BluRay.mkv
//! subgrab search "Movie Name"
//! subgrab download 12345 --dest /media/films
//! ```

use clap::Parser;

use subgrab::cli::{Cli, Command, ExitCode, Output};
use subgrab::commands;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = run(cli).await;
    std::process::exit(exit_code.into());
}

/// Dispatch the parsed command and return its exit code
async fn run(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Command::Guess(cmd) => commands::guess_cmd(cmd, &output),
        Command::Search(cmd) => commands::search_cmd(cmd, &output).await,
        Command::Download(cmd) => commands::download_cmd(cmd, &output).await,
    }
}
