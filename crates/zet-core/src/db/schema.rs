//! SQLite schema for the zet catalog
//!
//! The catalog mirrors the on-disk notes: one row per directory, one
//! per note file, plus links, tags, and the zettel/tag association.
//! `zettel_fts` is a shadow full-text index over (title, body, tags)
//! kept consistent by triggers so every write path - including the
//! synchronizer's bulk transaction - maintains it for free.

use rusqlite::Connection;

use crate::error::{Result, ZetError};

const SCHEMA_SQL: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS dir (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT UNIQUE NOT NULL          -- timestamp identifier, e.g. 20231028012959
);

CREATE TABLE IF NOT EXISTS zettel (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,                -- file name, e.g. README.md
  title TEXT NOT NULL,
  body TEXT NOT NULL,
  mtime TEXT NOT NULL,               -- RFC 3339, truncated to whole seconds
  dir_name TEXT NOT NULL,
  FOREIGN KEY(dir_name) REFERENCES dir(name)
);

CREATE TABLE IF NOT EXISTS link (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  content TEXT NOT NULL,             -- the matched link text
  from_zettel_id INTEGER NOT NULL,
  to_zettel_id INTEGER NOT NULL,
  UNIQUE(content, from_zettel_id, to_zettel_id),
  FOREIGN KEY(from_zettel_id) REFERENCES zettel(id) ON DELETE CASCADE,
  FOREIGN KEY(to_zettel_id) REFERENCES zettel(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS tag (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS zettel_tags (
  zettel_id INTEGER NOT NULL,
  tag_id INTEGER NOT NULL,
  PRIMARY KEY(zettel_id, tag_id),
  FOREIGN KEY(zettel_id) REFERENCES zettel(id) ON DELETE CASCADE,
  FOREIGN KEY(tag_id) REFERENCES tag(id) ON DELETE CASCADE
);

CREATE VIRTUAL TABLE IF NOT EXISTS zettel_fts USING fts5(
  title,
  body,
  tags,
  tokenize='porter unicode61'
);

-- Shadow triggers: zettel rows mirror into the FTS table. The tags
-- column is the space-joined, sorted-distinct tag names of the note.
CREATE TRIGGER IF NOT EXISTS ai_zettel AFTER INSERT ON zettel BEGIN
  INSERT INTO zettel_fts(rowid, title, body, tags)
  VALUES (new.id, new.title, new.body, COALESCE((
      SELECT GROUP_CONCAT(name, ' ') FROM (
        SELECT DISTINCT t.name AS name
        FROM tag t JOIN zettel_tags zt ON t.id = zt.tag_id
        WHERE zt.zettel_id = new.id
        ORDER BY t.name
      )
    ), ''));
END;

CREATE TRIGGER IF NOT EXISTS au_zettel AFTER UPDATE ON zettel BEGIN
  UPDATE zettel_fts SET title = new.title, body = new.body, tags = COALESCE((
      SELECT GROUP_CONCAT(name, ' ') FROM (
        SELECT DISTINCT t.name AS name
        FROM tag t JOIN zettel_tags zt ON t.id = zt.tag_id
        WHERE zt.zettel_id = new.id
        ORDER BY t.name
      )
    ), '')
  WHERE rowid = old.id;
END;

CREATE TRIGGER IF NOT EXISTS ad_zettel AFTER DELETE ON zettel BEGIN
  DELETE FROM zettel_fts WHERE rowid = old.id;
END;

-- Association changes refresh the FTS tags column for the touched note.
CREATE TRIGGER IF NOT EXISTS ai_zettel_tags AFTER INSERT ON zettel_tags BEGIN
  UPDATE zettel_fts SET tags = COALESCE((
      SELECT GROUP_CONCAT(name, ' ') FROM (
        SELECT DISTINCT t.name AS name
        FROM tag t JOIN zettel_tags zt ON t.id = zt.tag_id
        WHERE zt.zettel_id = new.zettel_id
        ORDER BY t.name
      )
    ), '')
  WHERE rowid = new.zettel_id;
END;

CREATE TRIGGER IF NOT EXISTS au_zettel_tags AFTER UPDATE ON zettel_tags BEGIN
  UPDATE zettel_fts SET tags = COALESCE((
      SELECT GROUP_CONCAT(name, ' ') FROM (
        SELECT DISTINCT t.name AS name
        FROM tag t JOIN zettel_tags zt ON t.id = zt.tag_id
        WHERE zt.zettel_id = new.zettel_id
        ORDER BY t.name
      )
    ), '')
  WHERE rowid = new.zettel_id;
END;

CREATE TRIGGER IF NOT EXISTS ad_zettel_tags AFTER DELETE ON zettel_tags BEGIN
  UPDATE zettel_fts SET tags = COALESCE((
      SELECT GROUP_CONCAT(name, ' ') FROM (
        SELECT DISTINCT t.name AS name
        FROM tag t JOIN zettel_tags zt ON t.id = zt.tag_id
        WHERE zt.zettel_id = old.zettel_id
        ORDER BY t.name
      )
    ), '')
  WHERE rowid = old.zettel_id;
END;
"#;

/// Create all tables, the FTS shadow table, and triggers. Idempotent.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| ZetError::Catalog(format!("failed to create schema: {e}")))
}
