//! Cross-crate integration test helpers.
//!
//! Provides a harness that drives a real store and an in-memory model side
//! by side, so a test can check the document after every step.

use crate::fixtures::{TestEntry, TestStore};
use entrystore_core::{add_or_replace, AddOutcome, Entry};

/// A test harness for integration testing.
pub struct IntegrationHarness {
    /// The store under test.
    pub store: TestStore,
    /// What the document should hold.
    expected: Vec<TestEntry>,
}

impl IntegrationHarness {
    /// Creates a harness over an empty store.
    pub fn new() -> Self {
        Self {
            store: TestStore::new(),
            expected: Vec::new(),
        }
    }

    /// Adds an entry to the store and the model.
    pub fn add(&mut self, entry: TestEntry, overwrite: bool) -> AddOutcome {
        self.store.add_entry(entry.clone(), overwrite);
        add_or_replace(entry, &mut self.expected, overwrite)
    }

    /// Deletes the first match from the store and the model.
    ///
    /// Panics if the store and the model disagree on whether anything matched.
    pub fn delete(&mut self, entry: &TestEntry) -> bool {
        let removed = self.store.delete_entry(entry);
        let position = self.expected.iter().position(|e| e.same_entry(entry));
        assert_eq!(removed, position.is_some(), "delete of {entry:?} disagrees with model");
        if let Some(idx) = position {
            self.expected.remove(idx);
        }
        removed
    }

    /// Returns the model's view of the document.
    pub fn expected(&self) -> &[TestEntry] {
        &self.expected
    }

    /// Panics unless the document equals the model and no error was reported.
    pub fn verify(&self) {
        assert_eq!(self.store.get_all(), self.expected, "document diverged from model");
        self.store.assert_no_errors();
    }
}

impl Default for IntegrationHarness {
    fn default() -> Self {
        Self::new()
    }
}
