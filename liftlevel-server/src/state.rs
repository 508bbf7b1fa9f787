//! Shared application state for the liftlevel server

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use liftlevel_core::{LedgerError, SqliteLedger, Tracker};

/// Number of recent workouts shown on the tracking page
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Upper bound for any history listing, page or API
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Clamp a requested history length to `1..=MAX_HISTORY_LIMIT`
pub fn clamp_history_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_HISTORY_LIMIT)
}

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Workout tracker backed by the SQLite ledger
    pub tracker: Arc<Tracker<SqliteLedger>>,
    /// Recent workouts shown on the tracking page
    pub history_limit: u32,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state over an existing ledger
    pub fn new(ledger: Arc<SqliteLedger>) -> Self {
        Self {
            tracker: Arc::new(Tracker::new(ledger)),
            history_limit: DEFAULT_HISTORY_LIMIT,
            started_at: Utc::now(),
        }
    }

    /// Open (or create) the database at `path` and build state over it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        Ok(Self::new(Arc::new(SqliteLedger::open(path)?)))
    }

    /// State over a fresh in-memory database (for testing)
    pub fn new_for_testing() -> Self {
        let ledger = SqliteLedger::open_in_memory().expect("in-memory ledger");
        Self::new(Arc::new(ledger))
    }

    /// Override how many workouts the tracking page lists (clamped to `1..=100`)
    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = clamp_history_limit(limit);
        self
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
