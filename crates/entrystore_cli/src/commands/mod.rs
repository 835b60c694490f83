//! CLI command implementations.

pub mod inspect;
pub mod records;
pub mod verify;

use crate::error::{CliError, CliResult};
use crate::record::Record;
use crate::Format;
use entrystore_core::{DocumentCodec, EntryStore, ErrorLog, StoreConfig};
use std::path::Path;

/// A store of JSON records with a codec picked at runtime.
pub type RecordStore = EntryStore<Record, Box<dyn DocumentCodec<Record>>>;

/// Opens the store at `path` and attaches an error log to it.
pub fn open(path: &Path, format: Format, create: bool) -> CliResult<(RecordStore, ErrorLog)> {
    if !create && !path.is_file() {
        return Err(CliError::MissingStore(path.display().to_string()));
    }
    let config = StoreConfig::new().create_if_missing(false);
    let store = EntryStore::open_with_config(path, format.codec(), config)?;
    let log = ErrorLog::new();
    store.on_error(log.clone());
    if create {
        store.ensure_exists();
        check(&log)?;
    }
    Ok((store, log))
}

/// Fails with the first soft error the store reported, if any.
pub fn check(log: &ErrorLog) -> CliResult<()> {
    match log.take().into_iter().next() {
        Some(report) => Err(CliError::Reported {
            operation: report.operation.to_string(),
            detail: report.detail,
        }),
        None => Ok(()),
    }
}
