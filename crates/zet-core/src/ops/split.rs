//! Splitting a note into sub-notes
//!
//! Second-level headings (`## `) in the source body become new notes:
//! the heading text is the sub-note's title and the lines up to the
//! next heading are its body. Each sub-note links back to the source
//! note.

use std::path::{Path, PathBuf};

use crate::error::{Result, ZetError};
use crate::meta;
use crate::note::NoteParser;
use crate::ops::add::{add_at, create_note_dir, isosec};

/// One extracted sub-note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubNote {
    pub title: String,
    pub body: String,
}

/// Split note content into sub-notes created under the notes root,
/// each carrying a back-link to the source note at `zettel_dir`.
///
/// Directory names are allocated from a counter seeded with the
/// current isosec and incremented per sub-note, so the names stay
/// unique even when several notes are created within one second.
/// Creation fails outright on a directory collision.
///
/// Returns the paths of the created note files.
pub fn split(zet_dir: &Path, zettel_dir: &Path, content: &str) -> Result<Vec<PathBuf>> {
    if content.trim().is_empty() {
        return Err(ZetError::UsageError("zettel content is empty".to_string()));
    }

    let back_link = meta::link(zettel_dir)?;

    // Accept either a full note (title line present) or bare body text.
    let parsed = NoteParser::new().parse(content);
    let body = if parsed.title.is_empty() {
        content.to_string()
    } else {
        parsed.body
    };

    let sub_notes = make_sub_notes(&body);

    let mut iso: u64 = isosec()
        .parse()
        .map_err(|e| ZetError::Other(format!("failed to parse isosec as number: {e}")))?;

    let mut created = Vec::new();
    for sub in sub_notes {
        iso += 1;
        let dir_path = zet_dir.join(iso.to_string());
        create_note_dir(&dir_path)?;
        created.push(add_at(&dir_path, &sub.title, &sub.body, "", Some(&back_link))?);
    }

    Ok(created)
}

/// Cut body text into sub-notes at `## ` headings.
///
/// Lines before the first heading are discarded. Deeper headings
/// (`###` and beyond) are demoted one level so they fit the extracted
/// context. Bodies are trimmed of surrounding blank lines.
pub fn make_sub_notes(body: &str) -> Vec<SubNote> {
    let mut notes: Vec<SubNote> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in body.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            if let Some((title, lines)) = current.take() {
                notes.push(finish(title, lines));
            }
            current = Some((heading.to_string(), Vec::new()));
            continue;
        }

        if let Some((_, lines)) = current.as_mut() {
            let line = if line.starts_with("###") {
                &line[1..]
            } else {
                line
            };
            lines.push(line.to_string());
        }
    }

    if let Some((title, lines)) = current.take() {
        notes.push(finish(title, lines));
    }

    notes
}

fn finish(title: String, lines: Vec<String>) -> SubNote {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let body = match first {
        Some(start) => {
            let end = lines.iter().rposition(|l| !l.trim().is_empty()).unwrap_or(start);
            lines[start..=end].join("\n")
        }
        None => String::new(),
    };
    SubNote { title, body }
}
