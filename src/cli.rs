//! CLI argument parsing for zet
//!
//! Global flags: `--root`, `--format`, `--quiet`, `--verbose`,
//! `--log-level`. The notes root comes from `--root` or `ZET_PATH`;
//! the database path from `ZET_DB_PATH` (default `<root>/data.db`).

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

use zet_core::list::SortOrder;

/// Parse and validate a sort order argument
fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    SortOrder::from_str(s).map_err(|e| e.to_string())
}

/// Parse and validate a log level argument
fn parse_log_level(s: &str) -> Result<String, String> {
    match s.to_lowercase().as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => Ok(s.to_lowercase()),
        _ => Err(format!(
            "invalid log level '{s}': expected one of: error, warn, info, debug, trace"
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Zet - Zettelkasten note management CLI
#[derive(Parser, Debug)]
#[command(name = "zet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Notes root directory (overrides ZET_PATH)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note (stdin is appended when piped)
    #[command(visible_alias = "a")]
    Add {
        /// Note title
        title: Option<String>,
        /// Note body
        body: Option<String>,
    },

    /// Search notes; #word filters on tags, t:/b: on title/body
    Search {
        /// Query terms
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List all notes
    #[command(visible_alias = "ls")]
    List {
        /// Sort order: creation, modified, title, or length
        #[arg(long, short, value_parser = parse_sort_order, default_value = "creation")]
        sort: SortOrder,
    },

    /// Split note content from stdin into sub-notes (run inside a note)
    Split,

    /// Merge linked notes from stdin into a single document
    Merge {
        /// Maximum expansion passes
        #[arg(long, short, default_value_t = 1)]
        depth: usize,
    },

    /// Print a section of a note's content
    Content {
        #[command(subcommand)]
        section: ContentSection,
    },

    /// Print the link line of a note
    #[command(visible_alias = "l")]
    Link {
        /// Directory identifier (defaults to the current note)
        isosec: Option<String>,
    },

    /// Print the current ISO timestamp identifier
    Isosec,

    /// Commit note files with their titles as messages
    Commit {
        /// Commit all modified and new notes
        #[arg(long)]
        all: bool,
    },

    /// Synchronize the catalog with the notes on disk
    Sync,
}

#[derive(Subcommand, Debug)]
pub enum ContentSection {
    /// Print the note title
    Title {
        /// Directory identifier (defaults to the current note)
        isosec: Option<String>,
    },
    /// Print the note body
    Body {
        isosec: Option<String>,
    },
    /// Print the note's link lines
    Links {
        isosec: Option<String>,
    },
    /// Print the note's tag lines
    Tags {
        isosec: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["zet", "add", "My Note", "Body text"]).unwrap();
        match cli.command {
            Commands::Add { title, body } => {
                assert_eq!(title.as_deref(), Some("My Note"));
                assert_eq!(body.as_deref(), Some("Body text"));
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_parse_search_joins_terms() {
        let cli = Cli::try_parse_from(["zet", "search", "zettel", "productive"]).unwrap();
        match cli.command {
            Commands::Search { query } => assert_eq!(query, vec!["zettel", "productive"]),
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_list_sort() {
        let cli = Cli::try_parse_from(["zet", "list", "--sort", "title"]).unwrap();
        match cli.command {
            Commands::List { sort } => assert_eq!(sort, SortOrder::Title),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_list_rejects_bad_sort() {
        assert!(Cli::try_parse_from(["zet", "list", "--sort", "bogus"]).is_err());
    }

    #[test]
    fn test_parse_merge_depth() {
        let cli = Cli::try_parse_from(["zet", "merge", "--depth", "3"]).unwrap();
        match cli.command {
            Commands::Merge { depth } => assert_eq!(depth, 3),
            _ => panic!("expected merge command"),
        }
    }

    #[test]
    fn test_parse_content_sections() {
        let cli = Cli::try_parse_from(["zet", "content", "body", "20231028012959"]).unwrap();
        match cli.command {
            Commands::Content {
                section: ContentSection::Body { isosec },
            } => assert_eq!(isosec.as_deref(), Some("20231028012959")),
            _ => panic!("expected content body command"),
        }
    }
}
