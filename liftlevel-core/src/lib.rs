//! liftlevel-core: Core library for the liftlevel workout tracker
//!
//! Logged sets earn XP, and total XP determines a character level from 1 to 10.
//!
//! - **Progression engine** - [`progression`] turns sets into XP and XP into levels
//! - **Workout ledger** - [`WorkoutLedger`] and [`SqliteLedger`] persist the character,
//!   exercise catalog and workout history
//! - **Tracker** - [`Tracker`] ties the two together for each request
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use liftlevel_core::{SqliteLedger, Tracker, WorkoutInput};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let ledger = Arc::new(SqliteLedger::open("liftlevel.db")?);
//!     let tracker = Tracker::new(ledger);
//!
//!     let outcome = tracker.log_workout(&WorkoutInput {
//!         exercise_id: 1,
//!         weight: 100.0,
//!         reps: 10,
//!         sets: 3,
//!     })?;
//!     println!("+{} XP, level {}", outcome.xp_earned, outcome.level);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod ledger;
pub mod progression;
pub mod tracker;

pub use error::TrackerError;
pub use ledger::{
    Exercise, LedgerError, NewWorkout, SqliteLedger, UNKNOWN_EXERCISE_NAME, UserAggregate,
    WorkoutLedger, WorkoutRecord,
};
pub use progression::{MAX_LEVEL, Progress};
pub use tracker::{CharacterState, Dashboard, Tracker, WorkoutInput, WorkoutOutcome};
