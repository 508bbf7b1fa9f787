//! Error types for liftlevel-core

use thiserror::Error;

use crate::ledger::LedgerError;

/// Top-level error type for tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
