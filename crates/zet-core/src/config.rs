//! Runtime configuration for zet
//!
//! All configuration comes from the environment; core operations take
//! the resolved paths as parameters and never read the environment
//! themselves.
//!
//! - `ZET_PATH`: the notes root (required unless `--root` is given)
//! - `ZET_DB_PATH`: the catalog database (default `<root>/data.db`)
//! - `VISUAL` / `EDITOR`: preferred editor, with common fallbacks

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, ZetError};

/// Default catalog file name inside the notes root
pub const DEFAULT_DB_FILE: &str = "data.db";

/// Resolved zet configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding the timestamped note directories
    pub zet_dir: PathBuf,
    /// Path to the catalog database
    pub db_path: PathBuf,
    /// Preferred editor command, if one could be resolved
    pub editor: Option<String>,
}

impl Config {
    /// Resolve configuration from the environment, with an optional
    /// notes-root override (the CLI's global `--root` flag).
    pub fn resolve(root_override: Option<PathBuf>) -> Result<Self> {
        let zet_dir = match root_override {
            Some(p) => p,
            None => env::var_os("ZET_PATH").map(PathBuf::from).ok_or_else(|| {
                ZetError::Config("notes root not set (export ZET_PATH or pass --root)".to_string())
            })?,
        };

        validate_root(&zet_dir)?;

        let db_path = env::var_os("ZET_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| zet_dir.join(DEFAULT_DB_FILE));

        Ok(Config {
            zet_dir,
            db_path,
            editor: preferred_editor(),
        })
    }
}

fn validate_root(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ZetError::Config(format!(
            "notes root is not a directory: {}",
            path.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ZetError::Config(format!(
            "notes root does not exist: {}",
            path.display()
        ))),
        Err(e) => Err(ZetError::Config(format!(
            "notes root is unreadable: {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Resolve the user's preferred editor: `VISUAL`, then `EDITOR`, then
/// the first of a few common editors found on `PATH`.
pub fn preferred_editor() -> Option<String> {
    for var in ["VISUAL", "EDITOR"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Some(editor);
            }
        }
    }

    ["vim", "vi", "nano", "emacs"]
        .iter()
        .find(|name| has_cmd(name))
        .map(|name| name.to_string())
}

/// Check whether a command is available on PATH.
fn has_cmd(name: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| dir.join(name).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_root_override_wins() {
        let dir = tempdir().unwrap();
        let config = Config::resolve(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.zet_dir, dir.path());
        assert_eq!(config.db_path, dir.path().join(DEFAULT_DB_FILE));
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = Config::resolve(Some(missing)).unwrap_err();
        assert!(matches!(err, ZetError::Config(_)));
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();
        let err = Config::resolve(Some(file)).unwrap_err();
        assert!(matches!(err, ZetError::Config(_)));
    }
}
