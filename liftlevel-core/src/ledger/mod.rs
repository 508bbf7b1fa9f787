//! Workout ledger: character aggregate, exercise catalog and workout history
//! persisted in SQLite

mod error;
mod migrations;
mod store;
mod types;

pub use error::LedgerError;
pub use store::{SqliteLedger, WorkoutLedger};
pub use types::{Exercise, NewWorkout, UNKNOWN_EXERCISE_NAME, UserAggregate, WorkoutRecord};
