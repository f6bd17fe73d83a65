//! The `list` command: enumerate notes in a chosen order

use crate::cli::{Cli, OutputFormat};
use zet_core::error::{Result, ZetError};
use zet_core::list::{self, SortOrder};

pub fn run(cli: &Cli, sort: SortOrder) -> Result<()> {
    let config = super::config(cli)?;
    let mut storage = super::open_storage(&config)?;

    let zettels = list::list(&mut storage, &config.zet_dir, sort)?;

    match cli.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&zettels)
                .map_err(|e| ZetError::Other(format!("failed to serialize listing: {e}")))?
        ),
        OutputFormat::Human => {
            for z in &zettels {
                println!("{} {}", z.dir_name, z.title);
            }
        }
    }

    storage.close()
}
