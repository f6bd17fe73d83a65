//! Note creation
//!
//! A new note is a fresh timestamp-named directory holding a
//! `README.md`. Creation is non-interactive whenever any content is
//! supplied; a completely empty invocation opens the new file in the
//! user's editor.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;

use crate::error::{Result, ZetError};
use crate::meta;
use crate::sync::NOTE_FILE;

/// The current UTC time as a 14-character directory identifier,
/// `YYYYMMDDhhmmss`.
pub fn isosec() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Create a new note under the notes root.
///
/// The file is assembled from title, body, and stdin, each included
/// only when non-empty. When the caller's working directory is itself
/// a note directory, a `See:` back-link to that note is appended.
/// With no content at all the new file is opened in `editor`.
///
/// Returns the path of the new note file.
pub fn add(
    zet_dir: &Path,
    editor: Option<&str>,
    title: &str,
    body: &str,
    stdin: &str,
) -> Result<PathBuf> {
    let dir_path = zet_dir.join(isosec());
    create_note_dir(&dir_path)?;

    // If the caller is not inside a note, skip auto-linking.
    let back_link = meta::curr_link(zet_dir).ok();

    let file = add_at(&dir_path, title, body, stdin, back_link.as_deref())?;

    if title.is_empty() && body.is_empty() && stdin.is_empty() {
        let editor = editor.ok_or_else(|| {
            ZetError::Config(
                "no editor found (set VISUAL or EDITOR to edit the new note)".to_string(),
            )
        })?;
        open_file(editor, &file)?;
    }

    Ok(file)
}

/// Write a new `README.md` into an already-created note directory.
pub(crate) fn add_at(
    dir_path: &Path,
    title: &str,
    body: &str,
    stdin: &str,
    back_link: Option<&str>,
) -> Result<PathBuf> {
    let mut text = format!("# {title}");
    if !body.is_empty() {
        text.push_str("\n\n");
        text.push_str(body);
    }
    if !stdin.is_empty() {
        text.push_str("\n\n");
        text.push_str(stdin);
    }
    if let Some(link) = back_link {
        text.push_str("\n\nSee:\n\n");
        text.push_str(link);
    }
    text.push('\n');

    let file = dir_path.join(NOTE_FILE);
    fs::write(&file, text)?;
    Ok(file)
}

/// Create a note directory with mode 0700. Fails if the directory
/// already exists, which is how isosec collisions surface.
pub(crate) fn create_note_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path).map_err(|e| {
        ZetError::Other(format!(
            "failed to create note directory {}: {}",
            path.display(),
            e
        ))
    })
}

fn open_file(editor: &str, file: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(file)
        .status()
        .map_err(|e| ZetError::Other(format!("failed to launch editor {editor}: {e}")))?;
    if !status.success() {
        return Err(ZetError::Other(format!(
            "editor {editor} exited with {status}"
        )));
    }
    Ok(())
}
