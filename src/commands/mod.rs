//! Command handlers for the zet CLI

mod add;
mod content;
mod list;
mod maintenance;
mod merge;
mod search;
mod split;

use std::io::{IsTerminal, Read};

use crate::cli::{Cli, Commands};
use zet_core::error::Result;
use zet_core::{Config, Storage};

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Add { title, body } => add::run(
            cli,
            title.as_deref().unwrap_or_default(),
            body.as_deref().unwrap_or_default(),
        ),
        Commands::Search { query } => search::run(cli, &query.join(" ")),
        Commands::List { sort } => list::run(cli, *sort),
        Commands::Split => split::run(cli),
        Commands::Merge { depth } => merge::run(cli, *depth),
        Commands::Content { section } => content::run_content(cli, section),
        Commands::Link { isosec } => content::run_link(cli, isosec.as_deref()),
        Commands::Isosec => {
            println!("{}", zet_core::ops::isosec());
            Ok(())
        }
        Commands::Commit { all } => maintenance::run_commit(cli, *all),
        Commands::Sync => maintenance::run_sync(cli),
    }
}

/// Resolve configuration, honoring the global `--root` flag.
pub(crate) fn config(cli: &Cli) -> Result<Config> {
    Config::resolve(cli.root.clone())
}

pub(crate) fn open_storage(config: &Config) -> Result<Storage> {
    Storage::open(&config.db_path)
}

/// Content piped into the command, with the trailing newline removed.
/// An interactive stdin contributes nothing.
pub(crate) fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut content = String::new();
    stdin.read_to_string(&mut content)?;
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}
