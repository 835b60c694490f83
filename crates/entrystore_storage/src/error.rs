//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while touching the backing file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file does not exist.
    #[error("document file not found: {}", path.display())]
    NotFound {
        /// The missing file.
        path: PathBuf,
    },

    /// The backing file was missing and could not be created.
    #[error("failed to create document file {}: {source}", path.display())]
    InitFailed {
        /// The file that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classifies an error from opening `path`.
    pub(crate) fn from_open(err: io::Error, path: &std::path::Path) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }

    /// Returns true if the error means the file is missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
