//! The `sync` and `commit` commands

use crate::cli::Cli;
use zet_core::error::Result;
use zet_core::ops::commit;

pub fn run_sync(cli: &Cli) -> Result<()> {
    let config = super::config(cli)?;
    let mut storage = super::open_storage(&config)?;

    storage.sync(&config.zet_dir)?;

    storage.close()
}

pub fn run_commit(cli: &Cli, all: bool) -> Result<()> {
    let config = super::config(cli)?;
    if all {
        commit::commit_all(&config.zet_dir)
    } else {
        commit::commit_current(&config.zet_dir)
    }
}
