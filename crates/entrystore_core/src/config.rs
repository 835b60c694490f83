//! Store configuration.

use entrystore_storage::{FileOptions, WriteMode};

/// Configuration for opening a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Whether to create the backing file on open if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to create missing parent directories of the backing file.
    pub create_parent_dirs: bool,

    /// How whole-document writes are put on disk.
    pub write_mode: WriteMode,

    /// Whether to sync the file to disk after every write (safer but slower).
    pub sync_on_write: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            create_parent_dirs: true,
            write_mode: WriteMode::Truncate,
            sync_on_write: false,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the backing file on open.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to create missing parent directories.
    #[must_use]
    pub const fn create_parent_dirs(mut self, value: bool) -> Self {
        self.create_parent_dirs = value;
        self
    }

    /// Sets the write strategy.
    #[must_use]
    pub const fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Sets whether to sync after every write.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    pub(crate) fn file_options(&self) -> FileOptions {
        FileOptions {
            create_parent_dirs: self.create_parent_dirs,
            write_mode: self.write_mode,
            sync_on_write: self.sync_on_write,
        }
    }
}
