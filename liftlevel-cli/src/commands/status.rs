use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use liftlevel_core::{CharacterState, MAX_LEVEL, SqliteLedger, Tracker};

use crate::config::ConfigLoader;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Path of the SQLite workout database
    #[arg(long)]
    pub database: Option<PathBuf>,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let database = super::database_path(args.database, &config);

    let ledger = SqliteLedger::open(&database)
        .with_context(|| format!("Failed to open {}", database.display()))?;
    let tracker = Tracker::new(Arc::new(ledger));

    let character = tracker.snapshot()?;
    let workouts = tracker.history_count()?;
    println!("{}", render(&character, workouts));
    Ok(())
}

fn render(character: &CharacterState, workouts: u64) -> String {
    let progress = if character.level >= MAX_LEVEL {
        "max level reached".to_string()
    } else {
        format!(
            "{} / {} XP to level {} ({:.1}%)",
            character.progress.current,
            character.progress.needed,
            character.level + 1,
            character.progress.percentage
        )
    };
    format!(
        "Level:    {}\nTotal XP: {}\nProgress: {}\nWorkouts: {}",
        character.level, character.total_xp, progress, workouts
    )
}
