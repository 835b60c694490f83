//! Verify command implementation.

use super::open;
use crate::error::{CliError, CliResult};
use crate::record::Record;
use crate::Format;
use entrystore_core::matcher;
use std::path::Path;

/// Verification result.
#[derive(Debug, Default)]
pub struct VerifyResult {
    /// Number of records decoded.
    pub records_checked: usize,
    /// Records without an `"id"` field.
    pub missing_ids: usize,
    /// Records that are the same logical entry as an earlier record.
    pub duplicates: usize,
    /// Problems found.
    pub errors: Vec<String>,
}

impl VerifyResult {
    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Strictly decodes the store at `path` and checks its records.
pub fn verify(path: &Path, format: Format) -> CliResult<VerifyResult> {
    let (store, _log) = open(path, format, false)?;
    let mut result = VerifyResult::default();

    let records = match store.try_get_all() {
        Ok(records) => records,
        Err(err) => {
            result.errors.push(err.detail());
            return Ok(result);
        }
    };
    result.records_checked = records.len();

    for (index, record) in records.iter().enumerate() {
        if record.id().is_none() {
            result.missing_ids += 1;
        }
        if matcher::position_of(record, &records[..index]).is_some() {
            result.duplicates += 1;
            result.errors.push(format!("record {index} duplicates an earlier record: {}", describe(record)));
        }
    }
    Ok(result)
}

/// Runs the verify command.
pub fn run(path: &Path, format: Format) -> CliResult<()> {
    println!("Verifying store at {}", path.display());
    println!();

    let result = verify(path, format)?;
    println!("  Records checked: {}", result.records_checked);
    println!("  Missing ids:     {}", result.missing_ids);
    println!("  Duplicates:      {}", result.duplicates);
    for error in &result.errors {
        println!("  ERROR: {error}");
    }
    println!();

    if result.is_ok() {
        println!("Verification PASSED");
        Ok(())
    } else {
        println!("Verification FAILED");
        Err(CliError::VerificationFailed(result.errors.len()))
    }
}

fn describe(record: &Record) -> String {
    match record.id() {
        Some(id) => format!("id {id}"),
        None => record.to_line(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn clean_document_passes() {
        let (_dir, path) = write(r#"[{"id":1},{"id":2},{"note":"free"}]"#);
        let result = verify(&path, Format::Json).unwrap();
        assert!(result.is_ok());
        assert_eq!(result.records_checked, 3);
        assert_eq!(result.missing_ids, 1);
    }

    #[test]
    fn duplicates_fail() {
        let (_dir, path) = write(r#"[{"id":1,"v":1},{"id":2},{"id":1,"v":2}]"#);
        let result = verify(&path, Format::Json).unwrap();
        assert!(!result.is_ok());
        assert_eq!(result.duplicates, 1);
    }

    #[test]
    fn undecodable_document_fails() {
        let (_dir, path) = write("{\"id\":1}\n{oops\n");
        let result = verify(&path, Format::Jsonl).unwrap();
        assert!(!result.is_ok());
        assert!(result.errors[0].contains("line 2"));
        assert!(run(&path, Format::Jsonl).is_err());
    }
}
