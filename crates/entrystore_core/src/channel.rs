//! Error channel for soft failures.
//!
//! The store never returns I/O or decode failures to the caller of an
//! operation. Instead it builds an [`ErrorReport`] and hands it to every
//! subscribed [`ErrorSink`], then returns its fallback value. Every report is
//! also logged as a `tracing` warning, so failures are visible even with no
//! subscribers.
//!
//! Sinks are invoked after the store has released its file guard, so a sink
//! may call back into the store.
//!
//! # Usage
//!
//! ```rust,ignore
//! let log = ErrorLog::new();
//! store.on_error(log.clone());
//! store.on_error(|report: &ErrorReport| eprintln!("{}: {}", report.message, report.detail));
//!
//! let entries = store.get_all();
//! if entries.is_empty() && !log.is_empty() {
//!     // the read failed, the store is not necessarily empty
//! }
//! ```

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// The store call that hit a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Creating the backing file.
    Initialize,
    /// Reading all entries.
    GetAll,
    /// Reading all entries on the blocking pool.
    GetAllAsync,
    /// Writing a whole sequence.
    WriteAll,
    /// Adding one or more entries.
    AddEntries,
    /// Deleting one or more entries.
    DeleteEntries,
    /// Editing an entry in place.
    EditEntry,
    /// Replacing one entry with another.
    ReplaceEntry,
    /// Overwriting the whole document.
    ReplaceAll,
}

impl Operation {
    /// Returns a human-readable description of the failure.
    #[must_use]
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Initialize => "Failed to create the store file",
            Self::GetAll | Self::GetAllAsync => "Failed to read entries from the store file",
            Self::WriteAll => "Failed to write entries to the store file",
            Self::AddEntries => "Failed to add entries",
            Self::DeleteEntries => "Failed to delete entries",
            Self::EditEntry => "Failed to edit entry",
            Self::ReplaceEntry => "Failed to replace entry",
            Self::ReplaceAll => "Failed to replace all entries",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialize => "initialize",
            Self::GetAll => "get_all",
            Self::GetAllAsync => "get_all_async",
            Self::WriteAll => "write_all",
            Self::AddEntries => "add_entries",
            Self::DeleteEntries => "delete_entries",
            Self::EditEntry => "edit_entry",
            Self::ReplaceEntry => "replace_entry",
            Self::ReplaceAll => "replace_all",
        };
        f.write_str(name)
    }
}

/// One soft failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// The operation that failed.
    pub operation: Operation,
    /// The store's backing file.
    pub path: PathBuf,
    /// Human-readable summary.
    pub message: String,
    /// Diagnostic detail (the full error chain).
    pub detail: String,
}

/// Receives soft failures from a store.
pub trait ErrorSink: Send + Sync {
    /// Called once per failure point reached. Never called on success.
    fn report(&self, report: &ErrorReport);
}

impl<F> ErrorSink for F
where
    F: Fn(&ErrorReport) + Send + Sync,
{
    fn report(&self, report: &ErrorReport) {
        self(report)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The set of sinks subscribed to one store.
pub struct ErrorChannel {
    sinks: RwLock<Vec<(SubscriptionId, Arc<dyn ErrorSink>)>>,
    next_id: AtomicU64,
}

impl ErrorChannel {
    /// Creates a channel with no subscribers.
    pub fn new() -> Self {
        Self {
            sinks: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Adds a sink.
    pub fn subscribe(&self, sink: Arc<dyn ErrorSink>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sinks.write().push((id, sink));
        id
    }

    /// Removes a sink. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut sinks = self.sinks.write();
        let before = sinks.len();
        sinks.retain(|(sid, _)| *sid != id);
        sinks.len() != before
    }

    /// Returns the number of subscribed sinks.
    pub fn subscriber_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Logs the report and delivers it to every sink.
    pub fn notify(&self, report: &ErrorReport) {
        warn!(
            operation = %report.operation,
            path = %report.path.display(),
            detail = %report.detail,
            "{}",
            report.message
        );

        // Snapshot so a sink can subscribe or unsubscribe while being notified.
        let sinks: Vec<Arc<dyn ErrorSink>> =
            self.sinks.read().iter().map(|(_, sink)| Arc::clone(sink)).collect();
        for sink in sinks {
            sink.report(report);
        }
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A sink that keeps every report it receives.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    reports: Arc<Mutex<Vec<ErrorReport>>>,
}

impl ErrorLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every report received so far.
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.lock().clone()
    }

    /// Returns the number of reports received.
    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    /// Removes and returns every report.
    pub fn take(&self) -> Vec<ErrorReport> {
        std::mem::take(&mut *self.reports.lock())
    }

    /// Forgets every report.
    pub fn clear(&self) {
        self.reports.lock().clear();
    }
}

impl ErrorSink for ErrorLog {
    fn report(&self, report: &ErrorReport) {
        self.reports.lock().push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn sample(operation: Operation) -> ErrorReport {
        ErrorReport {
            operation,
            path: PathBuf::from("store.json"),
            message: operation.failure_message().to_string(),
            detail: "I/O error: disk on fire".to_string(),
        }
    }

    #[test]
    fn notify_reaches_every_sink() {
        let channel = ErrorChannel::new();
        let log = ErrorLog::new();
        let calls = Arc::new(AtomicUsize::new(0));

        channel.subscribe(Arc::new(log.clone()));
        let counter = Arc::clone(&calls);
        channel.subscribe(Arc::new(move |_: &ErrorReport| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        channel.notify(&sample(Operation::GetAll));
        channel.notify(&sample(Operation::WriteAll));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let ops: Vec<_> = log.reports().iter().map(|r| r.operation).collect();
        assert_eq!(ops, vec![Operation::GetAll, Operation::WriteAll]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let channel = ErrorChannel::new();
        let log = ErrorLog::new();
        let id = channel.subscribe(Arc::new(log.clone()));
        assert_eq!(channel.subscriber_count(), 1);

        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.notify(&sample(Operation::EditEntry));

        assert!(log.is_empty());
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn notify_without_sinks_is_fine() {
        ErrorChannel::new().notify(&sample(Operation::Initialize));
    }

    #[test]
    fn log_take_and_clear() {
        let log = ErrorLog::new();
        log.report(&sample(Operation::ReplaceAll));
        log.report(&sample(Operation::ReplaceEntry));
        assert_eq!(log.len(), 2);

        let taken = log.take();
        assert_eq!(taken.len(), 2);
        assert!(log.is_empty());

        log.report(&sample(Operation::AddEntries));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn operation_names() {
        assert_eq!(Operation::GetAllAsync.to_string(), "get_all_async");
        assert_eq!(
            Operation::DeleteEntries.failure_message(),
            "Failed to delete entries"
        );
    }
}
