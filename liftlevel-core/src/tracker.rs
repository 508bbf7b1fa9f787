//! Workout tracking business logic
//!
//! [`Tracker`] reads the character aggregate from the ledger, runs it through
//! the progression engine and writes the result back. The aggregate is passed
//! around as a plain value; nothing here holds character state between calls.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::ledger::{
    Exercise, NewWorkout, UNKNOWN_EXERCISE_NAME, UserAggregate, WorkoutLedger, WorkoutRecord,
};
use crate::progression::{self, Progress};

/// A logged set as submitted by the user
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorkoutInput {
    pub exercise_id: i64,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
}

/// Result of logging a workout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutOutcome {
    pub xp_earned: i64,
    pub total_xp: i64,
    pub level: u32,
    pub leveled_up: bool,
    pub progress: Progress,
}

/// Current character state with progress toward the next level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub total_xp: i64,
    pub level: u32,
    pub progress: Progress,
}

impl From<UserAggregate> for CharacterState {
    fn from(aggregate: UserAggregate) -> Self {
        Self {
            total_xp: aggregate.total_xp,
            level: aggregate.level,
            progress: progression::progress(aggregate.total_xp, aggregate.level),
        }
    }
}

/// Everything the tracking page shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub character: CharacterState,
    pub exercises: Vec<Exercise>,
    pub history: Vec<WorkoutRecord>,
}

/// Service combining the workout ledger with the progression engine
pub struct Tracker<L: WorkoutLedger> {
    ledger: Arc<L>,
}

impl<L: WorkoutLedger> Tracker<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Log a set, award XP and persist the new aggregate and history entry
    pub fn log_workout(&self, input: &WorkoutInput) -> Result<WorkoutOutcome, TrackerError> {
        let previous = self.ledger.read_aggregate()?;

        let weight = if input.weight.is_finite() && input.weight > 0.0 {
            input.weight
        } else {
            0.0
        };
        let xp_earned = progression::xp_earned(weight, input.reps, input.sets);
        let total_xp = previous.total_xp.saturating_add(xp_earned);
        let level = progression::level_for_xp(total_xp);
        let leveled_up = level > previous.level;

        let (exercise_id, exercise_name) = match self.ledger.get_exercise(input.exercise_id)? {
            Some(exercise) => (Some(exercise.id), exercise.name),
            None => {
                tracing::warn!(
                    exercise_id = input.exercise_id,
                    "Unknown exercise id, recording as {}",
                    UNKNOWN_EXERCISE_NAME
                );
                (None, UNKNOWN_EXERCISE_NAME.to_string())
            }
        };

        self.ledger.record_workout(
            total_xp,
            level,
            &NewWorkout {
                exercise_id,
                exercise_name,
                weight,
                reps: input.reps,
                sets: input.sets,
                xp_earned,
                timestamp: Utc::now(),
            },
        )?;

        tracing::info!(xp_earned, total_xp, level, "Workout logged");
        if leveled_up {
            tracing::info!(from = previous.level, to = level, "Level up");
        }

        Ok(WorkoutOutcome {
            xp_earned,
            total_xp,
            level,
            leveled_up,
            progress: progression::progress(total_xp, level),
        })
    }

    /// Current character state
    pub fn snapshot(&self) -> Result<CharacterState, TrackerError> {
        Ok(self.ledger.read_aggregate()?.into())
    }

    /// Reset XP and level and clear history
    pub fn reset(&self) -> Result<CharacterState, TrackerError> {
        self.ledger.reset_all()?;
        tracing::info!("Character reset");
        Ok(UserAggregate::default().into())
    }

    /// Character state, catalog and most recent workouts
    pub fn dashboard(&self, history_limit: u32) -> Result<Dashboard, TrackerError> {
        Ok(Dashboard {
            character: self.snapshot()?,
            exercises: self.exercises()?,
            history: self.history(history_limit)?,
        })
    }

    pub fn exercises(&self) -> Result<Vec<Exercise>, TrackerError> {
        Ok(self.ledger.list_exercises()?)
    }

    pub fn history(&self, limit: u32) -> Result<Vec<WorkoutRecord>, TrackerError> {
        Ok(self.ledger.list_history(limit)?)
    }

    pub fn history_count(&self) -> Result<u64, TrackerError> {
        Ok(self.ledger.history_count()?)
    }
}
