//! Catalog row types and queries
//!
//! The write helpers take a plain `&Connection` so the synchronizer
//! can run them inside its transaction (a `rusqlite::Transaction`
//! derefs to `Connection`).

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::error::{Result, ZetError};

/// One note row, optionally hydrated with its tags and outbound links.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Zettel {
    pub id: i64,
    /// File name, e.g. `README.md`
    pub name: String,
    pub title: String,
    pub body: String,
    /// Last modification time, RFC 3339, whole seconds
    pub mtime: String,
    /// Name of the directory this note lives in
    pub dir_name: String,
    pub tags: Vec<Tag>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub id: i64,
    /// The link text as it appears in the note
    pub content: String,
    pub from_zettel_id: i64,
    pub to_zettel_id: i64,
}

/// A parsed note ready for insertion or update, with link targets
/// already resolved to catalog ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct ZettelRecord {
    pub name: String,
    pub dir_name: String,
    pub title: String,
    pub body: String,
    pub mtime: String,
    /// (content, target note id)
    pub links: Vec<(String, i64)>,
    pub tags: Vec<String>,
}

impl super::Storage {
    /// All note rows, bare (no tags/links hydration).
    ///
    /// `order_by` must be one of the fixed clauses produced by
    /// [`crate::list::SortOrder`]; `None` leaves the order unspecified.
    pub fn all_zettels(&self, order_by: Option<&str>) -> Result<Vec<Zettel>> {
        let mut sql = "SELECT id, name, title, body, mtime, dir_name FROM zettel".to_string();
        if let Some(order) = order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| ZetError::Catalog(format!("failed to prepare zettel query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(Zettel {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    title: row.get(2)?,
                    body: row.get(3)?,
                    mtime: row.get(4)?,
                    dir_name: row.get(5)?,
                    tags: Vec::new(),
                    links: Vec::new(),
                })
            })
            .map_err(|e| ZetError::Catalog(format!("failed to query zettels: {e}")))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| ZetError::Catalog(format!("failed to read zettel rows: {e}")))
    }

    /// Tags associated with a note.
    pub fn zettel_tags(&self, zettel_id: i64) -> Result<Vec<Tag>> {
        tags_for(&self.conn, zettel_id)
    }

    /// Outbound links of a note.
    pub fn zettel_links(&self, zettel_id: i64) -> Result<Vec<Link>> {
        links_for(&self.conn, zettel_id)
    }
}

pub(crate) fn tags_for(conn: &Connection, zettel_id: i64) -> Result<Vec<Tag>> {
    let mut stmt = conn
        .prepare(
            "SELECT t.id, t.name FROM tag t
             JOIN zettel_tags zt ON t.id = zt.tag_id
             WHERE zt.zettel_id = ?1
             ORDER BY t.name",
        )
        .map_err(|e| ZetError::Catalog(format!("failed to prepare tag query: {e}")))?;

    let rows = stmt
        .query_map(params![zettel_id], |row| {
            Ok(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .map_err(|e| ZetError::Catalog(format!("failed to query tags: {e}")))?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| ZetError::Catalog(format!("failed to read tag rows: {e}")))
}

pub(crate) fn links_for(conn: &Connection, zettel_id: i64) -> Result<Vec<Link>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, content, from_zettel_id, to_zettel_id FROM link
             WHERE from_zettel_id = ?1 ORDER BY id",
        )
        .map_err(|e| ZetError::Catalog(format!("failed to prepare link query: {e}")))?;

    let rows = stmt
        .query_map(params![zettel_id], |row| {
            Ok(Link {
                id: row.get(0)?,
                content: row.get(1)?,
                from_zettel_id: row.get(2)?,
                to_zettel_id: row.get(3)?,
            })
        })
        .map_err(|e| ZetError::Catalog(format!("failed to query links: {e}")))?;

    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| ZetError::Catalog(format!("failed to read link rows: {e}")))
}

/// Resolve a directory identifier to the id of its note, if indexed.
pub(crate) fn zettel_id_for_dir(conn: &Connection, dir_name: &str) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM zettel WHERE dir_name = ?1 LIMIT 1",
        params![dir_name],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ZetError::Catalog(format!("failed to look up dir {dir_name}: {e}")))
}

pub(crate) fn insert_dir(conn: &Connection, name: &str) -> Result<()> {
    conn.execute("INSERT INTO dir (name) VALUES (?1)", params![name])
        .map_err(|e| ZetError::Catalog(format!("failed to insert dir {name}: {e}")))?;
    Ok(())
}

pub(crate) fn delete_dir(conn: &Connection, name: &str) -> Result<()> {
    conn.execute("DELETE FROM dir WHERE name = ?1", params![name])
        .map_err(|e| ZetError::Catalog(format!("failed to delete dir {name}: {e}")))?;
    Ok(())
}

/// Insert a note row with its links and tags. Returns the new note id.
pub(crate) fn insert_zettel(conn: &Connection, record: &ZettelRecord) -> Result<i64> {
    let id: i64 = conn
        .query_row(
            "INSERT INTO zettel (name, title, body, mtime, dir_name)
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
            params![
                record.name,
                record.title,
                record.body,
                record.mtime,
                record.dir_name
            ],
            |row| row.get(0),
        )
        .map_err(|e| {
            ZetError::Catalog(format!(
                "failed to insert zettel {}/{}: {}",
                record.dir_name, record.name, e
            ))
        })?;

    insert_links(conn, id, &record.links)?;
    insert_tags(conn, id, &record.tags)?;

    Ok(id)
}

/// Update a note row in place and re-diff its links and tags.
pub(crate) fn update_zettel(conn: &Connection, id: i64, record: &ZettelRecord) -> Result<()> {
    conn.execute(
        "UPDATE zettel SET title = ?1, body = ?2, mtime = ?3 WHERE id = ?4",
        params![record.title, record.body, record.mtime, id],
    )
    .map_err(|e| {
        ZetError::Catalog(format!(
            "failed to update zettel {}/{}: {}",
            record.dir_name, record.name, e
        ))
    })?;

    diff_links(conn, id, &record.links)?;
    diff_tags(conn, id, &record.tags)?;

    Ok(())
}

pub(crate) fn delete_zettel(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM zettel WHERE id = ?1", params![id])
        .map_err(|e| ZetError::Catalog(format!("failed to delete zettel {id}: {e}")))?;
    Ok(())
}

/// Set-difference the stored outbound links against the parsed set,
/// keyed by link content.
pub(crate) fn diff_links(conn: &Connection, id: i64, new_links: &[(String, i64)]) -> Result<()> {
    use std::collections::HashSet;

    let current = links_for(conn, id)?;
    let current_keys: HashSet<&str> = current.iter().map(|l| l.content.as_str()).collect();
    let new_keys: HashSet<&str> = new_links.iter().map(|(c, _)| c.as_str()).collect();

    let add: Vec<(String, i64)> = new_links
        .iter()
        .filter(|(c, _)| !current_keys.contains(c.as_str()))
        .cloned()
        .collect();
    insert_links(conn, id, &add)?;

    for link in current.iter().filter(|l| !new_keys.contains(l.content.as_str())) {
        conn.execute(
            "DELETE FROM link WHERE id = ?1 AND from_zettel_id = ?2",
            params![link.id, id],
        )
        .map_err(|e| ZetError::Catalog(format!("failed to remove link {}: {}", link.id, e)))?;
    }

    Ok(())
}

pub(crate) fn insert_links(conn: &Connection, id: i64, links: &[(String, i64)]) -> Result<()> {
    for (content, to_id) in links {
        conn.execute(
            "INSERT INTO link (content, from_zettel_id, to_zettel_id)
             VALUES (?1, ?2, ?3) ON CONFLICT DO NOTHING",
            params![content, id, to_id],
        )
        .map_err(|e| ZetError::Catalog(format!("failed to insert link for zettel {id}: {e}")))?;
    }
    Ok(())
}

/// Set-difference the stored tags against the parsed set, keyed by
/// name, then collect orphans.
pub(crate) fn diff_tags(conn: &Connection, id: i64, new_tags: &[String]) -> Result<()> {
    use std::collections::HashSet;

    let current = tags_for(conn, id)?;
    let current_keys: HashSet<&str> = current.iter().map(|t| t.name.as_str()).collect();
    let new_keys: HashSet<&str> = new_tags.iter().map(|t| t.as_str()).collect();

    let add: Vec<String> = new_tags
        .iter()
        .filter(|t| !current_keys.contains(t.as_str()))
        .cloned()
        .collect();
    insert_tags(conn, id, &add)?;

    for tag in current.iter().filter(|t| !new_keys.contains(t.name.as_str())) {
        conn.execute(
            "DELETE FROM zettel_tags WHERE zettel_id = ?1
             AND tag_id = (SELECT id FROM tag WHERE name = ?2)",
            params![id, tag.name],
        )
        .map_err(|e| {
            ZetError::Catalog(format!("failed to remove tag {} from zettel {id}: {e}", tag.name))
        })?;
    }

    clean_tags(conn)?;

    Ok(())
}

/// Insert tags (creating tag rows as needed) and associate them with
/// the given note.
pub(crate) fn insert_tags(conn: &Connection, zettel_id: i64, tags: &[String]) -> Result<()> {
    for tag in tags {
        let existing: Option<i64> = conn
            .query_row("SELECT id FROM tag WHERE name = ?1", params![tag], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| ZetError::Catalog(format!("failed to look up tag {tag}: {e}")))?;

        let tag_id = match existing {
            Some(id) => id,
            None => conn
                .query_row(
                    "INSERT INTO tag (name) VALUES (?1) RETURNING id",
                    params![tag],
                    |row| row.get(0),
                )
                .map_err(|e| ZetError::Catalog(format!("failed to insert tag {tag}: {e}")))?,
        };

        conn.execute(
            "INSERT INTO zettel_tags (zettel_id, tag_id)
             VALUES (?1, ?2) ON CONFLICT DO NOTHING",
            params![zettel_id, tag_id],
        )
        .map_err(|e| {
            ZetError::Catalog(format!(
                "failed to associate tag {tag} with zettel {zettel_id}: {e}"
            ))
        })?;
    }
    Ok(())
}

/// Delete every tag no longer referenced by any note.
pub(crate) fn clean_tags(conn: &Connection) -> Result<()> {
    conn.execute(
        "DELETE FROM tag WHERE id NOT IN (SELECT DISTINCT tag_id FROM zettel_tags)",
        [],
    )
    .map_err(|e| ZetError::Catalog(format!("failed to clean orphaned tags: {e}")))?;
    Ok(())
}
