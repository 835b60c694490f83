//! Record commands: list, get, put, delete.

use super::{check, open};
use crate::error::{CliError, CliResult};
use crate::record::Record;
use crate::Format;
use std::path::Path;
use tracing::info;

/// What `put` did with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// No record had the same id; it was appended.
    Added,
    /// A record with the same id was replaced.
    Replaced,
    /// A record with the same id exists and was kept.
    Kept,
}

/// Prints every record, one per line.
pub fn list(path: &Path, format: Format) -> CliResult<()> {
    let (store, log) = open(path, format, true)?;
    let records = store.get_all();
    check(&log)?;

    for record in &records {
        println!("{}", record.to_line());
    }
    info!(count = records.len(), "listed records");
    Ok(())
}

/// Returns the record with the given id.
pub fn find(path: &Path, format: Format, id: &str) -> CliResult<Option<Record>> {
    let (store, log) = open(path, format, true)?;
    let found = store.find_direct(&Record::probe(id), None);
    check(&log)?;
    Ok(found)
}

/// Prints the record with the given id.
pub fn get(path: &Path, format: Format, id: &str) -> CliResult<()> {
    match find(path, format, id)? {
        Some(record) => println!("{}", record.to_line()),
        None => println!("No record with id {id}"),
    }
    Ok(())
}

/// Adds `json` as a record, replacing a record with the same id when
/// `overwrite` is set.
pub fn insert(path: &Path, format: Format, json: &str, overwrite: bool) -> CliResult<PutOutcome> {
    let record = Record::parse(json).map_err(CliError::InvalidRecord)?;
    let (store, log) = open(path, format, true)?;

    let existed = store.exists(&record);
    check(&log)?;
    store.add_entry(record, overwrite);
    check(&log)?;

    Ok(match (existed, overwrite) {
        (false, _) => PutOutcome::Added,
        (true, true) => PutOutcome::Replaced,
        (true, false) => PutOutcome::Kept,
    })
}

/// Runs the put command.
pub fn put(path: &Path, format: Format, json: &str, overwrite: bool) -> CliResult<()> {
    let outcome = insert(path, format, json, overwrite)?;
    match outcome {
        PutOutcome::Added => println!("Added record"),
        PutOutcome::Replaced => println!("Replaced record"),
        PutOutcome::Kept => println!("Record exists; kept the stored version"),
    }
    info!(?outcome, path = %path.display(), "put record");
    Ok(())
}

/// Deletes the record with the given id. Returns true if one was removed.
pub fn remove(path: &Path, format: Format, id: &str) -> CliResult<bool> {
    let (store, log) = open(path, format, true)?;
    let removed = store.delete_entry(&Record::probe(id));
    check(&log)?;
    Ok(removed)
}

/// Runs the delete command.
pub fn delete(path: &Path, format: Format, id: &str) -> CliResult<()> {
    if remove(path, format, id)? {
        println!("Deleted record {id}");
    } else {
        println!("No record with id {id}");
    }
    Ok(())
}
