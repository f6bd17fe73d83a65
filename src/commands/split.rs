//! The `split` command: break note content into sub-notes

use crate::cli::Cli;
use zet_core::error::{Result, ZetError};
use zet_core::{meta, ops};

pub fn run(cli: &Cli) -> Result<()> {
    let config = super::config(cli)?;

    let content = super::read_stdin()?;
    if content.is_empty() {
        return Ok(());
    }

    let (cwd, inside) = meta::in_zettel(&config.zet_dir)?;
    if !inside {
        return Err(ZetError::NotInZettel);
    }

    let created = ops::split(&config.zet_dir, &cwd, &content)?;

    if !cli.quiet {
        for file in &created {
            if let Some(dir) = file.parent() {
                println!("{}", dir.display());
            }
        }
    }

    Ok(())
}
