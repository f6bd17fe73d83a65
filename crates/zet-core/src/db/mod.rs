//! SQLite catalog for zet
//!
//! `Storage` owns the database connection for the lifetime of a
//! command. The catalog is brought into agreement with the filesystem
//! by [`Storage::sync`](crate::sync); reads reflect the state as of
//! the last sync.

mod schema;
mod search;
pub(crate) mod zettel;

pub use search::ResultZettel;
pub use zettel::{Link, Tag, Zettel};

use std::path::Path;

use rusqlite::Connection;

use crate::error::{Result, ZetError};

/// The zet catalog database
#[derive(Debug)]
pub struct Storage {
    pub(crate) conn: Connection,
}

impl Storage {
    /// Open (creating if necessary) the catalog at the given path and
    /// ensure the schema exists.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|e| {
            ZetError::Catalog(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        schema::create_schema(&conn)?;

        Ok(Storage { conn })
    }

    /// An in-memory catalog, for tests and throwaway work.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ZetError::Catalog(format!("failed to open in-memory database: {e}")))?;
        schema::create_schema(&conn)?;
        Ok(Storage { conn })
    }

    /// Close the database connection.
    ///
    /// Dropping the storage also closes it; this form surfaces the
    /// error instead of discarding it.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| ZetError::Catalog(format!("failed to close database: {e}")))
    }
}
