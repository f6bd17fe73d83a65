//! The `merge` command: expand link lines into their targets' bodies

use crate::cli::Cli;
use zet_core::error::Result;
use zet_core::ops;

pub fn run(cli: &Cli, depth: usize) -> Result<()> {
    let config = super::config(cli)?;

    let text = super::read_stdin()?;
    if text.is_empty() {
        return Ok(());
    }

    let merged = ops::merge(&config.zet_dir, &text, depth)?;
    println!("{merged}");

    Ok(())
}
