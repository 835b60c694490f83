//! Test fixtures and store helpers.
//!
//! Provides a sample entry type and convenience functions for setting up
//! stores in temporary directories.

use entrystore_codec::JsonCodec;
use entrystore_core::{Entry, EntryStore, ErrorLog, StoreConfig};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;
use tempfile::TempDir;

/// A sample entry. Two entries are the same logical entry when their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEntry {
    /// Identity.
    pub id: u32,
    /// Payload.
    pub name: String,
}

impl TestEntry {
    /// Creates an entry.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Entry for TestEntry {
    fn compare(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// The store type used by the fixtures.
pub type TestEntryStore = EntryStore<TestEntry, JsonCodec>;

/// A store in a temporary directory with an error log attached.
pub struct TestStore {
    /// The store instance.
    pub store: TestEntryStore,
    /// Every soft error the store reported.
    pub errors: ErrorLog,
    /// The temporary directory (kept alive to prevent cleanup).
    dir: TempDir,
}

impl TestStore {
    /// Creates a store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a store with an explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("entries.json");
        let store = EntryStore::open_with_config(path, JsonCodec::default(), config)
            .expect("Failed to open store");
        let errors = ErrorLog::new();
        store.on_error(errors.clone());
        Self { store, errors, dir }
    }

    /// Creates a store holding `entries`.
    pub fn with_entries(entries: &[TestEntry]) -> Self {
        let test_store = Self::new();
        test_store.store.write_all(entries);
        test_store
    }

    /// Returns the backing file path.
    pub fn path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Returns the temporary directory holding the store.
    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Returns the raw document text on disk.
    pub fn raw(&self) -> String {
        std::fs::read_to_string(self.store.path()).expect("Failed to read store file")
    }

    /// Panics if any soft error was reported.
    pub fn assert_no_errors(&self) {
        let reports = self.errors.reports();
        assert!(reports.is_empty(), "unexpected store errors: {reports:#?}");
    }
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestStore {
    type Target = TestEntryStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary store.
///
/// Fails the test if the store reported any soft error.
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&TestEntryStore) -> R,
{
    let test_store = TestStore::new();
    let result = f(&test_store.store);
    test_store.assert_no_errors();
    result
}

/// Returns `count` entries with ids `1..=count`.
pub fn numbered_entries(count: u32) -> Vec<TestEntry> {
    (1..=count)
        .map(|id| TestEntry::new(id, format!("entry-{id}")))
        .collect()
}
