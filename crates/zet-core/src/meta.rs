//! Standalone note accessors
//!
//! Read title, body, links, or tags of a single note straight from
//! disk, without touching the catalog. In this form link lines are
//! extracted verbatim; no target lookup happens.
//!
//! Accessors accept either the note directory or the `README.md` path
//! itself.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, ZetError};
use crate::note::NoteParser;
use crate::sync::NOTE_FILE;

/// The link line for a note: `* [<dir>](../<dir>) <title>`.
fn format_link(dir: &str, title: &str) -> String {
    format!("* [{dir}](../{dir}) {title}")
}

/// Resolve an accessor argument to the note file path.
fn note_file(path: &Path) -> PathBuf {
    if path.file_name().is_some_and(|n| n == NOTE_FILE) {
        path.to_path_buf()
    } else {
        path.join(NOTE_FILE)
    }
}

fn read_note(path: &Path) -> Result<String> {
    let file = note_file(path);
    match std::fs::metadata(&file) {
        Ok(meta) if meta.is_file() => Ok(std::fs::read_to_string(&file)?),
        Ok(_) => Err(ZetError::Other(format!(
            "path corresponds to a directory: {}",
            file.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ZetError::NotFound { path: file })
        }
        Err(e) => Err(e.into()),
    }
}

/// The note's title: the first `# ` line, prefix stripped. A note
/// without a title yields an empty string.
pub fn title(path: &Path) -> Result<String> {
    let content = read_note(path)?;
    Ok(content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .unwrap_or_default()
        .to_string())
}

/// The note's body: everything after the title that is neither a link
/// line nor a tag line.
pub fn body(path: &Path) -> Result<String> {
    let content = read_note(path)?;
    Ok(NoteParser::new().parse(&content).body)
}

/// The note's link lines, verbatim, one per line.
pub fn links(path: &Path) -> Result<String> {
    let content = read_note(path)?;
    let parser = NoteParser::new();
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| parser.is_link_line(line))
        .collect();
    Ok(lines.join("\n"))
}

/// The note's tag lines with indentation stripped, one per line.
pub fn tags(path: &Path) -> Result<String> {
    let content = read_note(path)?;
    let parser = NoteParser::new();
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| parser.is_tag_line(line))
        .map(|line| line.trim_start_matches([' ', '\t']))
        .collect();
    Ok(lines.join("\n"))
}

/// The link line for the note at the given path.
pub fn link(path: &Path) -> Result<String> {
    let dir_path = if path.file_name().is_some_and(|n| n == NOTE_FILE) {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    let dir = dir_path
        .file_name()
        .ok_or_else(|| ZetError::Other(format!("no directory name in {}", path.display())))?
        .to_string_lossy();
    let t = title(dir_path)?;
    Ok(format_link(&dir, &t))
}

/// The link line for the note the caller is currently inside.
pub fn curr_link(zet_dir: &Path) -> Result<String> {
    let (cwd, inside) = in_zettel(zet_dir)?;
    if !inside {
        return Err(ZetError::NotInZettel);
    }
    link(&cwd)
}

/// Whether the working directory is a note directory: its parent must
/// be the notes root. Returns the working directory alongside.
///
/// The working directory comes back from the OS with symlinks
/// resolved, so the notes root is canonicalized before comparing.
pub fn in_zettel(zet_dir: &Path) -> Result<(PathBuf, bool)> {
    let cwd = env::current_dir()?;
    let root = zet_dir
        .canonicalize()
        .unwrap_or_else(|_| zet_dir.to_path_buf());
    let inside = cwd.parent() == Some(root.as_path());
    Ok((cwd, inside))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const NOTE: &str = "# A Title\n\
body line\n\
\n\
* [20231028012959](../20231028012959) Other note\n\
\n\
    #alpha #beta\n";

    fn note_dir() -> tempfile::TempDir {
        let root = tempdir().unwrap();
        let dir = root.path().join("20240101000000");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("README.md"), NOTE).unwrap();
        root
    }

    #[test]
    fn test_title_from_dir_or_file() {
        let root = note_dir();
        let dir = root.path().join("20240101000000");
        assert_eq!(title(&dir).unwrap(), "A Title");
        assert_eq!(title(&dir.join("README.md")).unwrap(), "A Title");
    }

    #[test]
    fn test_body_excludes_links_and_tags() {
        let root = note_dir();
        let dir = root.path().join("20240101000000");
        assert_eq!(body(&dir).unwrap(), "body line\n\n");
    }

    #[test]
    fn test_links_returns_whole_lines() {
        let root = note_dir();
        let dir = root.path().join("20240101000000");
        assert_eq!(
            links(&dir).unwrap(),
            "* [20231028012959](../20231028012959) Other note"
        );
    }

    #[test]
    fn test_tags_strips_indentation() {
        let root = note_dir();
        let dir = root.path().join("20240101000000");
        assert_eq!(tags(&dir).unwrap(), "#alpha #beta");
    }

    #[test]
    fn test_link_line_format() {
        let root = note_dir();
        let dir = root.path().join("20240101000000");
        assert_eq!(
            link(&dir).unwrap(),
            "* [20240101000000](../20240101000000) A Title"
        );
    }

    #[test]
    fn test_missing_note_is_not_found() {
        let root = tempdir().unwrap();
        let err = title(&root.path().join("20990101000000")).unwrap_err();
        assert!(matches!(err, ZetError::NotFound { .. }));
    }
}
