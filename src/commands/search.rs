//! The `search` command: full-text search with highlighted snippets

use crate::cli::{Cli, OutputFormat};
use zet_core::db::ResultZettel;
use zet_core::error::{Result, ZetError};

// ANSI escape codes for match highlighting and directory names
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

pub fn run(cli: &Cli, query: &str) -> Result<()> {
    let config = super::config(cli)?;
    let mut storage = super::open_storage(&config)?;

    storage.sync(&config.zet_dir)?;

    let results = match storage.search(query, RED, RESET) {
        Ok(results) => results,
        // The display contract for a rejected query is a single
        // synthetic row, not a process failure.
        Err(ZetError::SearchSyntax(_)) => vec![ResultZettel::syntax_error()],
        Err(e) => return Err(e),
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results).map_err(
            |e| ZetError::Other(format!("failed to serialize results: {e}")),
        )?),
        OutputFormat::Human => {
            for result in &results {
                print_result(result);
            }
        }
    }

    storage.close()
}

fn print_result(result: &ResultZettel) {
    println!(
        "{YELLOW}{}{RESET} {}",
        result.zettel.dir_name, result.title_snippet
    );
    if !result.body_snippet.is_empty() {
        for line in result.body_snippet.lines() {
            if !line.trim().is_empty() {
                println!("{line}");
            }
        }
    }
    if !result.tags_snippet.is_empty() {
        println!("    #{}", result.tags_snippet.replace(' ', " #"));
    }
}
