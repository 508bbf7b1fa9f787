//! Records owned by the workout ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name recorded for workouts whose exercise id is not in the catalog
pub const UNKNOWN_EXERCISE_NAME: &str = "Unknown Exercise";

/// Singleton character state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAggregate {
    pub total_xp: i64,
    pub level: u32,
}

impl Default for UserAggregate {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: 1,
        }
    }
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub category: String,
}

impl Exercise {
    /// Label used in the exercise picker, e.g. "Squat (Legs)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}

/// A workout about to be appended to history
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    /// Catalog reference, `None` when the requested id was unknown
    pub exercise_id: Option<i64>,
    /// Exercise name as it was when the workout was logged
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub xp_earned: i64,
    pub timestamp: DateTime<Utc>,
}

/// Persisted history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Auto-incremented database ID
    pub id: i64,
    pub exercise_id: Option<i64>,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub xp_earned: i64,
    pub timestamp: DateTime<Utc>,
}
