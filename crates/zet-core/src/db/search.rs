//! Full-text search over the catalog
//!
//! Queries run against the `zettel_fts` shadow table with BM25
//! ranking (column weights: title 1.5, body 1.0, tags 1.5). Matched
//! fragments are wrapped in caller-supplied delimiter strings so the
//! CLI can use ANSI colors and other front-ends their own markup.

use regex::Regex;
use rusqlite::params;
use serde::Serialize;

use super::zettel::{links_for, tags_for, Zettel};
use crate::error::{Result, ZetError};

/// A search hit: the note row plus highlighted snippets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultZettel {
    #[serde(flatten)]
    pub zettel: Zettel,
    /// Title with matched fragments wrapped in the delimiters
    pub title_snippet: String,
    /// Matching body lines, each prefixed `<line>: ` with the line's
    /// position in the file
    pub body_snippet: String,
    /// Space-joined tag names with matched fragments wrapped
    pub tags_snippet: String,
}

impl ResultZettel {
    /// The synthetic row front-ends display when the full-text engine
    /// rejects the query.
    pub fn syntax_error() -> Self {
        ResultZettel {
            title_snippet: "Incorrect syntax".to_string(),
            ..Default::default()
        }
    }
}

impl super::Storage {
    /// Search the catalog, wrapping matched fragments in `before` and
    /// `after`. Results are ranked by BM25; each row is hydrated with
    /// its tags and outbound links.
    ///
    /// An empty query returns no rows. A query the FTS engine rejects
    /// yields [`ZetError::SearchSyntax`].
    pub fn search(&self, term: &str, before: &str, after: &str) -> Result<Vec<ResultZettel>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let query = preprocess_query(term);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT z.id, z.name, z.title, z.body, z.mtime, z.dir_name,
                    COALESCE(highlight(zettel_fts, 0, ?2, ?3), '') AS title_snippet,
                    COALESCE(highlight(zettel_fts, 1, ?2, ?3), '') AS body_snippet,
                    COALESCE(highlight(zettel_fts, 2, ?2, ?3), '') AS tags_snippet
                 FROM zettel_fts
                 JOIN zettel z ON zettel_fts.rowid = z.id
                 WHERE zettel_fts MATCH ?1
                 ORDER BY bm25(zettel_fts, 1.5, 1.0, 1.5)",
            )
            .map_err(|e| ZetError::Catalog(format!("failed to prepare search query: {e}")))?;

        let rows = stmt
            .query_map(params![query, before, after], |row| {
                Ok(ResultZettel {
                    zettel: Zettel {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        title: row.get(2)?,
                        body: row.get(3)?,
                        mtime: row.get(4)?,
                        dir_name: row.get(5)?,
                        tags: Vec::new(),
                        links: Vec::new(),
                    },
                    title_snippet: row.get(6)?,
                    body_snippet: row.get(7)?,
                    tags_snippet: row.get(8)?,
                })
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| ZetError::SearchSyntax(e.to_string()))?;

        let mut results = rows;
        for result in &mut results {
            result.zettel.tags = tags_for(&self.conn, result.zettel.id)?;
            result.zettel.links = links_for(&self.conn, result.zettel.id)?;
            result.body_snippet = line_snippets(&result.body_snippet, before, after);
        }

        Ok(results)
    }
}

/// Rewrite the user query for FTS5 and lowercase it (the tokenizer is
/// case-insensitive; lowercasing keeps the behavior explicit).
///
/// `#word` and the documented column aliases become FTS column
/// prefixes: `#word`/`#:word` -> `tags:word`, `t:` -> `title:`,
/// `b:` -> `body:`.
fn preprocess_query(term: &str) -> String {
    let tag_re = Regex::new(r"#:?(\w+)").expect("valid tag query regex");
    let title_re = Regex::new(r"\bt:").expect("valid title alias regex");
    let body_re = Regex::new(r"\bb:").expect("valid body alias regex");

    let q = tag_re.replace_all(term, "tags:$1");
    let q = title_re.replace_all(&q, "title:");
    let q = body_re.replace_all(&q, "body:");
    q.to_lowercase()
}

/// Collapse a highlighted body into grep-style match lines.
///
/// `highlight()` returns the whole body column, so line indices here
/// are body line indices; adding 2 turns them into file line numbers
/// (the title occupies line 1). Only lines carrying both delimiters -
/// i.e. a complete wrapped match - are kept.
fn line_snippets(body: &str, before: &str, after: &str) -> String {
    let mut lines = Vec::new();
    for (i, line) in body.lines().enumerate() {
        if line.contains(before) && line.contains(after) {
            lines.push(format!("{}: {}", i + 2, line));
        }
    }
    lines.join("\n")
}
