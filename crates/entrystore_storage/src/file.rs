//! The guarded backing file.

use crate::error::{StorageError, StorageResult};
use parking_lot::{Mutex, MutexGuard};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// How a document is put on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate the existing file and write the new document into it.
    ///
    /// A failure after truncation can leave the file empty.
    #[default]
    Truncate,

    /// Write to a sibling temp file, then rename it over the target.
    ///
    /// Readers observe either the old or the new document, never a prefix.
    AtomicReplace,
}

/// Options controlling how the backing file is created and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOptions {
    /// Create missing parent directories when initializing the file.
    pub create_parent_dirs: bool,
    /// Strategy used by [`FileGuard::write`].
    pub write_mode: WriteMode,
    /// Call `sync_all` after every write.
    pub sync_on_write: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            create_parent_dirs: true,
            write_mode: WriteMode::Truncate,
            sync_on_write: false,
        }
    }
}

/// A backing file plus the lock that serializes every access to it.
///
/// # Thread Safety
///
/// `DocumentFile` is `Send + Sync`. Holding a [`FileGuard`] excludes every
/// other guard on the same `DocumentFile`. Separate `DocumentFile` values
/// pointing at the same path do not exclude each other.
#[derive(Debug)]
pub struct DocumentFile {
    path: PathBuf,
    options: FileOptions,
    lock: Mutex<()>,
}

impl DocumentFile {
    /// Binds a path. Nothing is touched on disk until a guard is used.
    pub fn new(path: impl Into<PathBuf>, options: FileOptions) -> Self {
        Self {
            path: path.into(),
            options,
            lock: Mutex::new(()),
        }
    }

    /// Returns the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the options this file was bound with.
    #[must_use]
    pub fn options(&self) -> FileOptions {
        self.options
    }

    /// Returns true if the backing file currently exists.
    ///
    /// Unguarded; the answer may be stale by the time it is used.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Blocks until the file's lock is free and returns a guard over it.
    pub fn lock(&self) -> FileGuard<'_> {
        FileGuard {
            file: self,
            _held: self.lock.lock(),
        }
    }

    /// Returns a guard if the lock is free right now.
    pub fn try_lock(&self) -> Option<FileGuard<'_>> {
        self.lock.try_lock().map(|held| FileGuard { file: self, _held: held })
    }
}

/// Exclusive access to a [`DocumentFile`] for as long as it lives.
pub struct FileGuard<'a> {
    file: &'a DocumentFile,
    _held: MutexGuard<'a, ()>,
}

impl FileGuard<'_> {
    /// Returns the path to the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file.path
    }

    /// Creates the backing file if it is missing.
    ///
    /// Returns `Ok(false)` if the file was already present and `Ok(true)` if
    /// it was created empty. Existence is checked on every call.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InitFailed`] if the file (or, when enabled,
    /// its parent directories) cannot be created.
    pub fn ensure_exists(&self) -> StorageResult<bool> {
        let path = self.path();
        if path.is_file() {
            return Ok(false);
        }

        let init_failed = |source: std::io::Error| StorageError::InitFailed {
            path: path.to_path_buf(),
            source,
        };

        if self.file.options.create_parent_dirs {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(init_failed)?;
            }
        }

        File::create(path).map_err(init_failed)?;
        info!(path = %path.display(), "created document file");
        Ok(true)
    }

    /// Reads the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the file is missing and
    /// [`StorageError::Io`] for any other failure.
    pub fn read(&self) -> StorageResult<String> {
        let path = self.path();
        let mut file = File::open(path).map_err(|e| StorageError::from_open(e, path))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        debug!(path = %path.display(), bytes = contents.len(), "read document");
        Ok(contents)
    }

    /// Replaces the file's contents with `contents`.
    ///
    /// The file must already exist; call [`ensure_exists`](Self::ensure_exists)
    /// first when it may not.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the file is missing and
    /// [`StorageError::Io`] for any other failure.
    pub fn write(&self, contents: &str) -> StorageResult<()> {
        match self.file.options.write_mode {
            WriteMode::Truncate => self.write_truncate(contents)?,
            WriteMode::AtomicReplace => self.write_atomic(contents)?,
        }
        debug!(path = %self.path().display(), bytes = contents.len(), "wrote document");
        Ok(())
    }

    /// Returns the size of the file in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the file is missing.
    pub fn len(&self) -> StorageResult<u64> {
        let path = self.path();
        let meta = fs::metadata(path).map_err(|e| StorageError::from_open(e, path))?;
        Ok(meta.len())
    }

    /// Returns true if the file exists and holds no bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the file is missing.
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    fn write_truncate(&self, contents: &str) -> StorageResult<()> {
        let path = self.path();
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| StorageError::from_open(e, path))?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        if self.file.options.sync_on_write {
            file.sync_all()?;
        }
        Ok(())
    }

    fn write_atomic(&self, contents: &str) -> StorageResult<()> {
        let path = self.path();
        if !path.is_file() {
            return Err(StorageError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let tmp = temp_sibling(path);
        let result = (|| -> StorageResult<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
}
