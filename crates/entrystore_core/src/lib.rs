//! # EntryStore Core
//!
//! A generic, file-backed entry store.
//!
//! An [`EntryStore`] keeps an ordered sequence of caller-defined entries in a
//! single text document on disk. Every operation reads the whole document,
//! computes the new sequence, and writes the whole document back, all while
//! holding the store's file guard. This crate provides:
//!
//! - The [`Entry`] trait: the comparator that defines "same logical entry"
//! - The [`matcher`] functions built on that comparator
//! - The [`EntryStore`] read and write paths
//! - The error channel ([`ErrorSink`], [`ErrorLog`]) that receives soft errors
//! - Configuration ([`StoreConfig`]) and counters ([`StoreStats`])
//!
//! ## Errors
//!
//! Opening a store with an invalid path is the only failure returned to the
//! caller. I/O and decode failures during operations are reported to the
//! subscribed sinks (and logged through `tracing`); the operation then
//! returns a fallback value such as an empty sequence.
//!
//! ## Example
//!
//! ```rust
//! use entrystore_codec::JsonCodec;
//! use entrystore_core::{Entry, EntryStore};
//! use serde::{Deserialize, Serialize};
//! use std::cmp::Ordering;
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Contact {
//!     id: u32,
//!     name: String,
//! }
//!
//! impl Entry for Contact {
//!     fn compare(&self, other: &Self) -> Ordering {
//!         self.id.cmp(&other.id)
//!     }
//! }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = EntryStore::open(dir.path().join("contacts.json"), JsonCodec::default()).unwrap();
//!
//! store.add_entry(Contact { id: 1, name: "Ada".into() }, false);
//! store.add_entry(Contact { id: 2, name: "Brian".into() }, false);
//!
//! let found = store.get(|c| c.name.starts_with('B'));
//! assert_eq!(found.map(|c| c.id), Some(2));
//! assert_eq!(store.count(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod config;
mod entry;
mod error;
pub mod matcher;
mod stats;
mod store;

pub use channel::{ErrorChannel, ErrorLog, ErrorReport, ErrorSink, Operation, SubscriptionId};
pub use config::StoreConfig;
pub use entry::Entry;
pub use error::{StoreError, StoreResult};
pub use matcher::{add_or_replace, AddOutcome};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::EntryStore;

pub use entrystore_codec::{DocumentCodec, JsonCodec, JsonLinesCodec};
pub use entrystore_storage::WriteMode;

/// EntryStore version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
