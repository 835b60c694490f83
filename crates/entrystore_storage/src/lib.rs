//! # EntryStore Storage
//!
//! Guarded whole-file document storage.
//!
//! A [`DocumentFile`] binds one path to one mutual-exclusion domain. Every
//! read, write, and initialization of the file goes through a [`FileGuard`]
//! obtained from [`DocumentFile::lock`], so a caller that keeps one guard
//! across a read, a computation, and a write performs that whole cycle
//! without interference from other guarded callers in the process.
//!
//! This crate knows nothing about entries or document formats; it moves
//! strings in and out of one file.
//!
//! ## Example
//!
//! ```rust
//! use entrystore_storage::{DocumentFile, FileOptions};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = DocumentFile::new(dir.path().join("items.json"), FileOptions::default());
//!
//! let guard = file.lock();
//! assert!(guard.ensure_exists().unwrap());
//! guard.write("[1,2,3]").unwrap();
//! assert_eq!(guard.read().unwrap(), "[1,2,3]");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;

pub use error::{StorageError, StorageResult};
pub use file::{DocumentFile, FileGuard, FileOptions, WriteMode};
