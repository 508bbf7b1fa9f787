//! Ledger storage trait and SQLite implementation

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use super::error::LedgerError;
use super::migrations;
use super::types::{Exercise, NewWorkout, UserAggregate, WorkoutRecord};

/// Row id of the singleton aggregate
const AGGREGATE_ID: i64 = 1;

/// Persistence for the character aggregate, exercise catalog and workout history
pub trait WorkoutLedger: Send + Sync {
    fn read_aggregate(&self) -> Result<UserAggregate, LedgerError>;
    fn write_aggregate(&self, total_xp: i64, level: u32) -> Result<(), LedgerError>;

    fn append_history(&self, workout: &NewWorkout) -> Result<i64, LedgerError>;
    /// Store the new aggregate and its history entry together, or neither
    fn record_workout(
        &self,
        total_xp: i64,
        level: u32,
        workout: &NewWorkout,
    ) -> Result<i64, LedgerError>;
    fn list_history(&self, limit: u32) -> Result<Vec<WorkoutRecord>, LedgerError>;
    fn history_count(&self) -> Result<u64, LedgerError>;

    fn list_exercises(&self) -> Result<Vec<Exercise>, LedgerError>;
    fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, LedgerError>;

    /// Zero the aggregate and clear all history
    fn reset_all(&self) -> Result<(), LedgerError>;
}

/// SQLite-backed workout ledger
pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Open or create database at path, creating parent directories as needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, LedgerError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, LedgerError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let ledger = Self {
            conn: Mutex::new(conn),
        };
        ledger.init()?;
        Ok(ledger)
    }

    /// Run migrations
    fn init(&self) -> Result<(), LedgerError> {
        let mut conn = self.conn.lock().unwrap();
        if migrations::apply_pending(&mut conn)? > 0 {
            tracing::info!(
                "Ledger schema upgraded to version {}",
                migrations::LATEST_VERSION
            );
        }
        Ok(())
    }

    fn upsert_aggregate(conn: &Connection, total_xp: i64, level: u32) -> Result<(), LedgerError> {
        conn.execute(
            "INSERT INTO user_data (id, total_xp, level) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET total_xp = excluded.total_xp, level = excluded.level",
            rusqlite::params![AGGREGATE_ID, total_xp, level],
        )?;
        Ok(())
    }

    fn insert_workout(conn: &Connection, workout: &NewWorkout) -> Result<i64, LedgerError> {
        conn.execute(
            "INSERT INTO workout_history (exercise_id, exercise_name, weight, reps, sets, xp_earned, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                workout.exercise_id,
                workout.exercise_name,
                workout.weight,
                workout.reps,
                workout.sets,
                workout.xp_earned,
                workout.timestamp,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<WorkoutRecord, rusqlite::Error> {
        Ok(WorkoutRecord {
            id: row.get(0)?,
            exercise_id: row.get(1)?,
            exercise_name: row.get(2)?,
            weight: row.get(3)?,
            reps: row.get(4)?,
            sets: row.get(5)?,
            xp_earned: row.get(6)?,
            timestamp: row.get(7)?,
        })
    }

    fn row_to_exercise(row: &rusqlite::Row) -> Result<Exercise, rusqlite::Error> {
        Ok(Exercise {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
        })
    }
}

impl WorkoutLedger for SqliteLedger {
    fn read_aggregate(&self) -> Result<UserAggregate, LedgerError> {
        let conn = self.conn.lock().unwrap();
        let aggregate = conn
            .query_row(
                "SELECT total_xp, level FROM user_data WHERE id = ?1",
                [AGGREGATE_ID],
                |row| {
                    Ok(UserAggregate {
                        total_xp: row.get(0)?,
                        level: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(aggregate.unwrap_or_default())
    }

    fn write_aggregate(&self, total_xp: i64, level: u32) -> Result<(), LedgerError> {
        let conn = self.conn.lock().unwrap();
        Self::upsert_aggregate(&conn, total_xp, level)
    }

    fn append_history(&self, workout: &NewWorkout) -> Result<i64, LedgerError> {
        let conn = self.conn.lock().unwrap();
        Self::insert_workout(&conn, workout)
    }

    fn record_workout(
        &self,
        total_xp: i64,
        level: u32,
        workout: &NewWorkout,
    ) -> Result<i64, LedgerError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        Self::upsert_aggregate(&tx, total_xp, level)?;
        let id = Self::insert_workout(&tx, workout)?;
        tx.commit()?;
        Ok(id)
    }

    fn list_history(&self, limit: u32) -> Result<Vec<WorkoutRecord>, LedgerError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, exercise_id, exercise_name, weight, reps, sets, xp_earned, timestamp
             FROM workout_history ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit], Self::row_to_record)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn history_count(&self) -> Result<u64, LedgerError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM workout_history", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn list_exercises(&self) -> Result<Vec<Exercise>, LedgerError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name, category FROM exercises ORDER BY id")?;
        let rows = stmt.query_map([], Self::row_to_exercise)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, LedgerError> {
        let conn = self.conn.lock().unwrap();
        let exercise = conn
            .query_row(
                "SELECT id, name, category FROM exercises WHERE id = ?1",
                [id],
                Self::row_to_exercise,
            )
            .optional()?;
        Ok(exercise)
    }

    fn reset_all(&self) -> Result<(), LedgerError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "UPDATE user_data SET total_xp = 0, level = 1 WHERE id = ?1",
            [AGGREGATE_ID],
        )?;
        tx.execute("DELETE FROM workout_history", [])?;
        tx.commit()?;
        Ok(())
    }
}
