//! Ledger error types

use thiserror::Error;

/// Errors for workout ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
}
