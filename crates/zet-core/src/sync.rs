//! Catalog synchronization
//!
//! Brings the catalog into exact agreement with the notes root: new
//! directories and files are indexed, files whose modification time
//! advanced are re-parsed, and rows for vanished files and
//! directories are deleted. The whole reconciliation runs in one
//! write transaction; a failure on an individual note is logged and
//! skipped, a failure to set up or commit the transaction aborts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use walkdir::WalkDir;

use crate::db::zettel::{
    clean_tags, delete_dir, delete_zettel, insert_dir, insert_zettel, update_zettel,
    zettel_id_for_dir, ZettelRecord,
};
use crate::db::Storage;
use crate::error::{Result, ZetError};
use crate::note::NoteParser;

/// Canonical note file name; a directory without one is not indexed.
pub const NOTE_FILE: &str = "README.md";

/// What the catalog knows about one indexed file.
struct CatalogEntry {
    id: i64,
    mtime: String,
}

/// directory name -> file name -> catalog entry
type CatalogMap = HashMap<String, HashMap<String, CatalogEntry>>;

impl Storage {
    /// Synchronize the catalog with the notes tree at `zet_dir`.
    #[tracing::instrument(skip(self, zet_dir), fields(root = %zet_dir.display()))]
    pub fn sync(&mut self, zet_dir: &Path) -> Result<()> {
        let mut catalog = self.catalog_map()?;
        let parser = NoteParser::new();

        let tx = self
            .conn
            .transaction()
            .map_err(|e| ZetError::Catalog(format!("failed to start transaction: {e}")))?;

        process_zettels(&tx, &parser, zet_dir, &mut catalog)?;
        clean_tags(&tx)?;

        tx.commit()
            .map_err(|e| ZetError::Catalog(format!("failed to commit sync: {e}")))
    }

    /// Load the catalog into a nested directory -> file map.
    fn catalog_map(&self) -> Result<CatalogMap> {
        let mut map: CatalogMap = HashMap::new();
        for z in self.all_zettels(None)? {
            map.entry(z.dir_name).or_default().insert(
                z.name,
                CatalogEntry {
                    id: z.id,
                    mtime: z.mtime,
                },
            );
        }
        Ok(map)
    }
}

/// Walk the direct children of the notes root and reconcile each one.
/// Entries left in `catalog` afterwards no longer exist on disk and
/// are deleted.
fn process_zettels(
    conn: &Connection,
    parser: &NoteParser,
    zet_dir: &Path,
    catalog: &mut CatalogMap,
) -> Result<()> {
    for entry in WalkDir::new(zet_dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                // An unreadable root means nothing can be reconciled.
                if e.path() == Some(zet_dir) || e.path().is_none() {
                    return Err(ZetError::Config(format!(
                        "failed to read notes root {}: {}",
                        zet_dir.display(),
                        e
                    )));
                }
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_dir() || entry.file_name() == ".git" {
            continue;
        }

        let dir_name = entry.file_name().to_string_lossy().to_string();
        let dir_path = entry.path();

        let result = match catalog.remove(&dir_name) {
            None => add_zettel(conn, parser, dir_path, &dir_name),
            Some(mut files) => process_files(conn, parser, dir_path, &dir_name, &mut files),
        };
        if let Err(e) = result {
            tracing::warn!(dir = %dir_name, error = %e, "failed to process zettel directory");
        }
    }

    // Whatever is still in the map was removed on disk.
    for (dir_name, files) in catalog.drain() {
        for entry in files.values() {
            if let Err(e) = delete_zettel(conn, entry.id) {
                tracing::warn!(id = entry.id, error = %e, "failed to delete zettel row");
            }
        }
        if let Err(e) = delete_dir(conn, &dir_name) {
            tracing::warn!(dir = %dir_name, error = %e, "failed to delete dir row");
        }
    }

    Ok(())
}

/// Index a directory the catalog has never seen. Does nothing unless
/// the directory holds a `README.md`.
fn add_zettel(conn: &Connection, parser: &NoteParser, dir_path: &Path, dir_name: &str) -> Result<()> {
    let files = markdown_files(dir_path)?;
    if !files.iter().any(|(name, _)| name == NOTE_FILE) {
        return Ok(());
    }

    insert_dir(conn, dir_name)?;

    for (name, mtime) in files {
        match build_record(conn, parser, dir_path, dir_name, &name, mtime) {
            Ok(record) => {
                insert_zettel(conn, &record)?;
            }
            Err(e) => {
                tracing::warn!(dir = %dir_name, file = %name, error = %e, "failed to index note");
            }
        }
    }

    Ok(())
}

/// Reconcile the files of a directory the catalog already tracks.
fn process_files(
    conn: &Connection,
    parser: &NoteParser,
    dir_path: &Path,
    dir_name: &str,
    known: &mut HashMap<String, CatalogEntry>,
) -> Result<()> {
    for (name, mtime) in markdown_files(dir_path)? {
        match known.remove(&name) {
            None => match build_record(conn, parser, dir_path, dir_name, &name, mtime) {
                Ok(record) => {
                    insert_zettel(conn, &record)?;
                }
                Err(e) => {
                    tracing::warn!(dir = %dir_name, file = %name, error = %e, "failed to index note");
                }
            },
            Some(entry) => {
                if file_is_newer(&mtime, &entry.mtime) {
                    match build_record(conn, parser, dir_path, dir_name, &name, mtime) {
                        Ok(record) => update_zettel(conn, entry.id, &record)?,
                        Err(e) => {
                            tracing::warn!(dir = %dir_name, file = %name, error = %e, "failed to re-index note");
                        }
                    }
                }
            }
        }
    }

    // Files still in the map were deleted on disk.
    for entry in known.values() {
        delete_zettel(conn, entry.id)?;
    }
    clean_tags(conn)?;

    // A directory whose last note vanished loses its row too.
    if zettel_id_for_dir(conn, dir_name)?.is_none() {
        delete_dir(conn, dir_name)?;
    }

    Ok(())
}

/// Read a note file, parse it, and resolve its links against the
/// catalog. Links naming a directory that is not indexed are dropped.
fn build_record(
    conn: &Connection,
    parser: &NoteParser,
    dir_path: &Path,
    dir_name: &str,
    name: &str,
    mtime: DateTime<Utc>,
) -> Result<ZettelRecord> {
    let content = fs::read_to_string(dir_path.join(name))?;
    let parsed = parser.parse(&content);

    let mut links = Vec::new();
    for link in parsed.links {
        if let Some(to_id) = zettel_id_for_dir(conn, &link.dir_name)? {
            links.push((link.content, to_id));
        }
    }

    Ok(ZettelRecord {
        name: name.to_string(),
        dir_name: dir_name.to_string(),
        title: parsed.title,
        body: parsed.body,
        mtime: mtime.to_rfc3339_opts(SecondsFormat::Secs, true),
        links,
        tags: parsed.tags,
    })
}

/// The `.md` files directly inside a directory, with modification
/// times truncated to whole seconds.
fn markdown_files(dir_path: &Path) -> Result<Vec<(String, DateTime<Utc>)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(".md") || !entry.file_type()?.is_file() {
            continue;
        }
        let modified: DateTime<Utc> = entry.metadata()?.modified()?.into();
        let truncated = DateTime::from_timestamp(modified.timestamp(), 0)
            .unwrap_or_else(|| DateTime::UNIX_EPOCH);
        files.push((name, truncated));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Whether the on-disk mtime is strictly newer than the stored one.
/// Files touched within the same second as the stored value are not
/// re-indexed.
fn file_is_newer(file_mtime: &DateTime<Utc>, stored: &str) -> bool {
    match DateTime::parse_from_rfc3339(stored) {
        Ok(stored) => *file_mtime > stored.with_timezone(&Utc),
        Err(_) => true,
    }
}
