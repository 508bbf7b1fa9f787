use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use liftlevel_core::{SqliteLedger, Tracker};

use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Path of the SQLite workout database
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Confirm that all XP and workout history should be erased
    #[arg(long)]
    pub yes: bool,
}

pub fn run(args: ResetArgs) -> Result<()> {
    if !args.yes {
        bail!("Refusing to reset without --yes (this erases all XP and workout history)");
    }

    let config = ConfigLoader::load()?;
    let database = super::database_path(args.database, &config);
    reset_database(&database)?;

    println!("Character reset to level 1 with 0 XP");
    Ok(())
}

fn reset_database(database: &std::path::Path) -> Result<()> {
    let ledger = SqliteLedger::open(database)
        .with_context(|| format!("Failed to open {}", database.display()))?;
    Tracker::new(Arc::new(ledger)).reset()?;
    Ok(())
}
