//! The `add` command: create a new note

use crate::cli::Cli;
use zet_core::error::Result;
use zet_core::ops;

pub fn run(cli: &Cli, title: &str, body: &str) -> Result<()> {
    let config = super::config(cli)?;
    let stdin = super::read_stdin()?;

    let file = ops::add(
        &config.zet_dir,
        config.editor.as_deref(),
        title,
        body,
        &stdin,
    )?;

    if !cli.quiet {
        if let Some(dir) = file.parent() {
            println!("{}", dir.display());
        }
    }

    Ok(())
}
