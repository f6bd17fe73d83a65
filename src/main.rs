//! Zet - a Zettelkasten note management CLI
//!
//! Notes are plain Markdown files in timestamp-named directories.
//! An SQLite catalog with a full-text shadow index mirrors the note
//! tree and backs search and listing; structural commands split a
//! note into sub-notes or merge a note's link graph into one
//! document.

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::Cli;
use zet_core::error::ExitCode as ZetExitCode;
use zet_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::run(&cli) {
        Ok(()) => ExitCode::from(ZetExitCode::Success as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("error: {e}");
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
