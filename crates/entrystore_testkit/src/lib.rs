//! # EntryStore Testkit
//!
//! Test utilities for EntryStore.
//!
//! This crate provides:
//! - Test fixtures: temporary stores with an attached error log
//! - A sample entry type, [`TestEntry`], matched by `id`
//! - Property-based test generators using proptest
//! - Stress testing utilities for concurrent access
//! - An integration harness that checks a store against an in-memory model
//!
//! ## Usage
//!
//! ```rust
//! use entrystore_testkit::prelude::*;
//!
//! with_temp_store(|store| {
//!     store.add_entry(TestEntry::new(1, "a"), false);
//!     assert_eq!(store.count(), 1);
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod stress;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::stress::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use stress::*;
