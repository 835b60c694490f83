//! Store statistics.
//!
//! Counters are atomic and can be read while operations are in progress.
//!
//! ```rust,ignore
//! let before = store.stats().writes;
//! store.delete_entry(&missing);
//! assert_eq!(store.stats().writes, before);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store counters.
///
/// Values are monotonically increasing for the lifetime of the handle.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Successful document reads.
    reads: AtomicU64,
    /// Successful document writes.
    writes: AtomicU64,
    /// Total bytes read.
    bytes_read: AtomicU64,
    /// Total bytes written.
    bytes_written: AtomicU64,
    /// Times the backing file was created.
    initializations: AtomicU64,
    /// Soft errors reported.
    errors: AtomicU64,
}

impl StoreStats {
    /// Creates a zeroed stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self, bytes: u64) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self, bytes: u64) {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_initialization(&self) {
        self.initializations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            initializations: self.initializations.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Successful document reads.
    pub reads: u64,
    /// Successful document writes.
    pub writes: u64,
    /// Total bytes read.
    pub bytes_read: u64,
    /// Total bytes written.
    pub bytes_written: u64,
    /// Times the backing file was created.
    pub initializations: u64,
    /// Soft errors reported.
    pub errors: u64,
}
