//! Schema migrations for the workout ledger
//!
//! Each step runs in its own transaction together with the bump of
//! `PRAGMA user_version`, so a failed step leaves the schema at the last
//! completed version.

use crate::ledger::LedgerError;
use rusqlite::Connection;

/// Ordered schema steps; step `n` (1-based) brings the schema to version `n`
const STEPS: &[(&str, &str)] = &[
    ("v001_initial", include_str!("v001_initial.sql")),
    ("v002_seed", include_str!("v002_seed.sql")),
    ("v003_history_index", include_str!("v003_history_index.sql")),
];

/// Schema version after every step has been applied
pub const LATEST_VERSION: u32 = STEPS.len() as u32;

/// Schema version recorded in the database file
pub fn schema_version(conn: &Connection) -> Result<u32, LedgerError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Bring the schema up to [`LATEST_VERSION`], returning how many steps ran
pub fn apply_pending(conn: &mut Connection) -> Result<u32, LedgerError> {
    apply_steps(conn, STEPS)
}

fn apply_steps(conn: &mut Connection, steps: &[(&str, &str)]) -> Result<u32, LedgerError> {
    let from = schema_version(conn)?;
    let mut applied = 0;

    for (version, (name, sql)) in (1u32..).zip(steps.iter()).skip(from as usize) {
        tracing::info!("Applying ledger schema step {}: {}", version, name);
        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| LedgerError::Migration(format!("{}: {}", name, e)))?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        applied += 1;
    }

    Ok(applied)
}
