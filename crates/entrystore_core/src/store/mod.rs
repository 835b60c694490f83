//! The entry store.
//!
//! Provides `EntryStore<T, C>`: a handle binding one backing file to one
//! codec. Every guarded operation follows the same cycle:
//!
//! 1. Acquire the file guard
//! 2. Read and decode the whole document
//! 3. Compute the new sequence
//! 4. Encode and write the whole document (only if something changed)
//! 5. Release the guard, then report any failure to the error channel

mod read;
mod write;

use crate::channel::{ErrorChannel, ErrorReport, ErrorSink, Operation, SubscriptionId};
use crate::config::StoreConfig;
use crate::entry::Entry;
use crate::error::{StoreError, StoreResult};
use crate::stats::{StatsSnapshot, StoreStats};
use entrystore_codec::{is_blank, DocumentCodec};
use entrystore_storage::{DocumentFile, FileGuard};
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A file-backed store of entries of type `T`, encoded with codec `C`.
///
/// Cloning is cheap; clones share the backing file, its guard, the error
/// channel, and the counters.
///
/// # Thread Safety
///
/// All synchronous operations on handles cloned from the same store are
/// serialized by one guard, so each is atomic with respect to the others.
/// Two stores opened separately on the same path do not coordinate.
pub struct EntryStore<T, C> {
    inner: Arc<StoreInner<T, C>>,
}

struct StoreInner<T, C> {
    file: DocumentFile,
    codec: C,
    config: StoreConfig,
    channel: ErrorChannel,
    stats: StoreStats,
    _marker: PhantomData<fn() -> T>,
}

/// Result of the compute step of a guarded cycle.
pub(crate) enum Change<R> {
    /// The sequence was modified and must be written.
    Dirty(R),
    /// Nothing changed; no write happens.
    Clean(R),
}

impl<T, C> Clone for EntryStore<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, C> fmt::Debug for EntryStore<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryStore")
            .field("path", &self.inner.file.path())
            .field("config", &self.inner.config)
            .field("channel", &self.inner.channel)
            .finish()
    }
}

impl<T, C> EntryStore<T, C>
where
    T: Entry,
    C: DocumentCodec<T>,
{
    /// Opens a store at `path` with the default configuration.
    ///
    /// The backing file is created if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if `path` is empty or names
    /// a directory.
    pub fn open(path: impl Into<PathBuf>, codec: C) -> StoreResult<Self> {
        Self::open_with_config(path, codec, StoreConfig::default())
    }

    /// Opens a store at `path` with an explicit configuration.
    ///
    /// When `config.create_if_missing` is set, a missing backing file is
    /// created here. A creation failure is not returned: it is logged, and
    /// the next operation that needs the file tries again.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if `path` is empty or names
    /// a directory.
    pub fn open_with_config(
        path: impl Into<PathBuf>,
        codec: C,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StoreError::invalid_argument("store path must not be empty"));
        }
        if path.is_dir() {
            return Err(StoreError::invalid_argument(format!(
                "store path {} is a directory",
                path.display()
            )));
        }

        let store = Self {
            inner: Arc::new(StoreInner {
                file: DocumentFile::new(path, config.file_options()),
                codec,
                config,
                channel: ErrorChannel::new(),
                stats: StoreStats::new(),
                _marker: PhantomData,
            }),
        };

        if config.create_if_missing {
            store.ensure_exists();
        }
        debug!(path = %store.path().display(), codec = store.inner.codec.name(), "opened store");
        Ok(store)
    }

    /// Returns the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.file.path()
    }

    /// Returns the configuration this store was opened with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Returns the codec used for the document.
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.inner.codec
    }

    /// Returns a snapshot of the store's counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.stats.snapshot()
    }

    /// Subscribes a sink to this store's soft errors.
    pub fn on_error<S>(&self, sink: S) -> SubscriptionId
    where
        S: ErrorSink + 'static,
    {
        self.inner.channel.subscribe(Arc::new(sink))
    }

    /// Removes a sink. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.channel.unsubscribe(id)
    }

    /// Creates the backing file if it is missing.
    ///
    /// Returns true if the file exists afterwards. A failure is reported
    /// through the error channel and returns false; it is not retried.
    pub fn ensure_exists(&self) -> bool {
        let result = {
            let guard = self.inner.file.lock();
            self.initialize(&guard)
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                self.report(Operation::Initialize, &err);
                false
            }
        }
    }

    /// Creates the file under an already-held guard.
    fn initialize(&self, guard: &FileGuard<'_>) -> StoreResult<()> {
        if guard.ensure_exists()? {
            self.inner.stats.record_initialization();
        }
        Ok(())
    }

    /// Reads and decodes the whole document under `guard`.
    ///
    /// A missing file is created and reads as empty.
    pub(crate) fn load(&self, guard: &FileGuard<'_>) -> StoreResult<Vec<T>> {
        let text = match guard.read() {
            Ok(text) => text,
            Err(err) if err.is_not_found() => {
                self.initialize(guard)?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        self.inner.stats.record_read(text.len() as u64);

        if is_blank(&text) {
            return Ok(Vec::new());
        }
        Ok(self.inner.codec.decode(&text)?)
    }

    /// Encodes and writes `entries` under `guard`.
    ///
    /// A missing file is created and the write retried exactly once.
    pub(crate) fn store(&self, guard: &FileGuard<'_>, entries: &[T]) -> StoreResult<()> {
        let text = self.inner.codec.encode(entries)?;
        match guard.write(&text) {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                self.initialize(guard)?;
                guard.write(&text)?;
            }
            Err(err) => return Err(err.into()),
        }
        self.inner.stats.record_write(text.len() as u64);
        debug!(path = %guard.path().display(), entries = entries.len(), "stored document");
        Ok(())
    }

    /// Runs one read-compute-write cycle under a single guard acquisition.
    pub(crate) fn modify<R>(&self, compute: impl FnOnce(&mut Vec<T>) -> Change<R>) -> StoreResult<R> {
        let guard = self.inner.file.lock();
        let mut entries = self.load(&guard)?;
        match compute(&mut entries) {
            Change::Dirty(value) => {
                self.store(&guard, &entries)?;
                Ok(value)
            }
            Change::Clean(value) => Ok(value),
        }
    }

    /// Returns the value, or reports the error and returns the fallback.
    pub(crate) fn absorb<R>(
        &self,
        operation: Operation,
        result: StoreResult<R>,
        fallback: impl FnOnce() -> R,
    ) -> R {
        match result {
            Ok(value) => value,
            Err(err) => {
                self.report(operation, &err);
                fallback()
            }
        }
    }

    pub(crate) fn report(&self, operation: Operation, err: &StoreError) {
        self.inner.stats.record_error();
        let report = ErrorReport {
            operation,
            path: self.path().to_path_buf(),
            message: operation.failure_message().to_string(),
            detail: err.detail(),
        };
        self.inner.channel.notify(&report);
    }

    pub(crate) fn file(&self) -> &DocumentFile {
        &self.inner.file
    }
}
