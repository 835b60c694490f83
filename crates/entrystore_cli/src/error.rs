//! CLI error types.

use entrystore_core::StoreError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store could not be opened.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An operation reported soft errors through the error channel.
    #[error("{operation} failed: {detail}")]
    Reported {
        /// Operation name.
        operation: String,
        /// Failure detail.
        detail: String,
    },

    /// The record given on the command line is not usable.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// No store file exists at the given path.
    #[error("no store found at {0}")]
    MissingStore(String),

    /// The document failed verification.
    #[error("verification failed with {0} problem(s)")]
    VerificationFailed(usize),
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
