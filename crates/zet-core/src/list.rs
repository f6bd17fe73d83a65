//! Note listing
//!
//! Listing synchronizes the catalog first so the rows always reflect
//! the on-disk state, then projects every note in the requested order.

use std::path::Path;
use std::str::FromStr;

use crate::db::{Storage, Zettel};
use crate::error::{Result, ZetError};

/// Orderings for the note listing.
///
/// `Creation` sorts by directory name, which is creation order given
/// timestamp-based directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Creation,
    Modified,
    Title,
    Length,
}

impl SortOrder {
    /// The ORDER BY clause for this ordering. Clauses are fixed
    /// strings; user input never reaches the SQL text.
    fn order_by(self) -> &'static str {
        match self {
            SortOrder::Creation => "dir_name ASC",
            SortOrder::Modified => "mtime ASC",
            SortOrder::Title => "title ASC",
            SortOrder::Length => "length(body) ASC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ZetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "creation" => Ok(SortOrder::Creation),
            "modified" => Ok(SortOrder::Modified),
            "title" => Ok(SortOrder::Title),
            "length" => Ok(SortOrder::Length),
            other => Err(ZetError::UsageError(format!(
                "unknown sort order: {other} (expected: creation, modified, title, or length)"
            ))),
        }
    }
}

/// Synchronize the catalog and return every note in the given order.
pub fn list(storage: &mut Storage, zet_dir: &Path, order: SortOrder) -> Result<Vec<Zettel>> {
    storage.sync(zet_dir)?;
    storage.all_zettels(Some(order.order_by()))
}
