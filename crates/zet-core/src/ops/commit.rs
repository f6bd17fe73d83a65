//! Git commits for note files
//!
//! Each commit uses the note's title as its message. The notes root
//! is expected to be (inside) a git repository; git itself reports
//! the case where it is not.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, ZetError};
use crate::meta;
use crate::sync::NOTE_FILE;

/// Commit the current note's `README.md`, using its title as the
/// commit message. The caller must be inside a note directory.
pub fn commit_current(zet_dir: &Path) -> Result<()> {
    let (cwd, inside) = meta::in_zettel(zet_dir)?;
    if !inside {
        return Err(ZetError::NotInZettel);
    }

    let file = cwd.join(NOTE_FILE);
    let title = meta::title(&cwd)?;
    commit(&cwd, &file, &title)
}

/// Commit every modified or untracked `README.md` under the notes
/// root, one commit per note.
pub fn commit_all(zet_dir: &Path) -> Result<()> {
    for rel in changed_note_files(zet_dir)? {
        let path = zet_dir.join(&rel);
        let title = match meta::title(&path) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(file = %rel.display(), error = %e, "failed to read note title");
                continue;
            }
        };
        commit(zet_dir, &path, &title)?;
    }
    Ok(())
}

fn commit(work_dir: &Path, file: &Path, message: &str) -> Result<()> {
    run_git(work_dir, &["add", &file.to_string_lossy()])?;
    run_git(work_dir, &["commit", "-m", message])?;
    Ok(())
}

fn run_git(work_dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .current_dir(work_dir)
        .args(args)
        .output()
        .map_err(|e| ZetError::Other(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(ZetError::Other(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&""),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// Parse `git status --porcelain` for modified and untracked
/// `README.md` files, relative to the notes root.
fn changed_note_files(zet_dir: &Path) -> Result<Vec<PathBuf>> {
    let output = Command::new("git")
        .current_dir(zet_dir)
        .args(["status", "--porcelain"])
        .output()
        .map_err(|e| ZetError::Other(format!("failed to run git status: {e}")))?;

    if !output.status.success() {
        return Err(ZetError::Other(format!(
            "git status failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let mut files = Vec::new();
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        if let Some(path) = line.strip_prefix(" M ") {
            if path.ends_with(NOTE_FILE) {
                files.push(PathBuf::from(path.trim()));
            }
            continue;
        }

        // Untracked directories may hold a fresh note.
        if let Some(path) = line.strip_prefix("?? ") {
            if path.ends_with('/') {
                let readme = PathBuf::from(path.trim()).join(NOTE_FILE);
                if zet_dir.join(&readme).is_file() {
                    files.push(readme);
                }
            }
        }
    }

    Ok(files)
}
