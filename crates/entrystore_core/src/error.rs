//! Error types for store operations.

use entrystore_codec::CodecError;
use entrystore_storage::StorageError;
use std::error::Error as _;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Document encode or decode error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The caller passed an argument the store cannot work with.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was wrong.
        message: String,
    },

    /// A blocking-pool task did not complete.
    #[error("background task failed: {message}")]
    Background {
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a background task error.
    pub fn background(message: impl Into<String>) -> Self {
        Self::Background {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the caller rather than the environment.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Renders this error and every source below it on one line.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            let text = err.to_string();
            if !out.contains(&text) {
                out.push_str(": ");
                out.push_str(&text);
            }
            source = err.source();
        }
        out
    }
}
