//! Error types and exit codes for zet
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (bad configuration, missing note, catalog failure)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad config, missing note, catalog failure (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during zet operations
#[derive(Error, Debug)]
pub enum ZetError {
    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("path does not exist: {path:?}")]
    NotFound { path: PathBuf },

    /// The caller's working directory is not a note directory.
    ///
    /// Operations that act on "the current note" (split, commit, the
    /// content accessors without an argument) require the working
    /// directory's parent to be the notes root.
    #[error("not in a zettel")]
    NotInZettel,

    #[error("catalog error: {0}")]
    Catalog(String),

    /// The full-text engine rejected the query. Front-ends render this
    /// as a synthetic result row rather than a process failure.
    #[error("incorrect search syntax: {0}")]
    SearchSyntax(String),

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ZetError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ZetError::UsageError(_) => ExitCode::Usage,

            ZetError::Config(_)
            | ZetError::NotFound { .. }
            | ZetError::NotInZettel
            | ZetError::Catalog(_)
            | ZetError::SearchSyntax(_) => ExitCode::Data,

            ZetError::Io(_) | ZetError::Other(_) => ExitCode::Failure,
        }
    }
}

/// Result type alias for zet operations
pub type Result<T> = std::result::Result<T, ZetError>;
