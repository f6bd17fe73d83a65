//! The `content` and `link` commands: per-note accessors

use std::path::PathBuf;

use crate::cli::{Cli, ContentSection};
use zet_core::error::{Result, ZetError};
use zet_core::{meta, Config};

pub fn run_content(cli: &Cli, section: &ContentSection) -> Result<()> {
    let config = super::config(cli)?;

    let (isosec, accessor): (&Option<String>, fn(&std::path::Path) -> Result<String>) =
        match section {
            ContentSection::Title { isosec } => (isosec, meta::title),
            ContentSection::Body { isosec } => (isosec, meta::body),
            ContentSection::Links { isosec } => (isosec, meta::links),
            ContentSection::Tags { isosec } => (isosec, meta::tags),
        };

    let path = note_path(&config, isosec.as_deref())?;
    println!("{}", accessor(&path)?);

    Ok(())
}

pub fn run_link(cli: &Cli, isosec: Option<&str>) -> Result<()> {
    let config = super::config(cli)?;
    let path = note_path(&config, isosec)?;
    println!("{}", meta::link(&path)?);
    Ok(())
}

/// Resolve the note a command acts on: the named directory, or the
/// current note when no identifier was given.
fn note_path(config: &Config, isosec: Option<&str>) -> Result<PathBuf> {
    match isosec {
        Some(dir) => Ok(config.zet_dir.join(dir)),
        None => {
            let (cwd, inside) = meta::in_zettel(&config.zet_dir)?;
            if !inside {
                return Err(ZetError::NotInZettel);
            }
            Ok(cwd)
        }
    }
}
