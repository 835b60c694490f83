//! Inspect command implementation.

use super::{check, open};
use crate::error::CliResult;
use crate::Format;
use serde::Serialize;
use std::path::Path;

/// Store inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Store path.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Number of entries in the document.
    pub entry_count: usize,
    /// Entries carrying an `"id"` field.
    pub with_id: usize,
    /// Codec used to decode the document.
    pub codec: &'static str,
}

/// Collects inspection data for the store at `path`.
pub fn inspect(path: &Path, format: Format) -> CliResult<InspectResult> {
    let (store, log) = open(path, format, false)?;
    let entries = store.get_all();
    check(&log)?;

    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    Ok(InspectResult {
        path: path.display().to_string(),
        size,
        entry_count: entries.len(),
        with_id: entries.iter().filter(|r| r.id().is_some()).count(),
        codec: store.codec().name(),
    })
}

/// Runs the inspect command.
pub fn run(path: &Path, format: Format, json: bool) -> CliResult<()> {
    let result = inspect(path, format)?;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(err) => println!("{{\"error\": \"{err}\"}}"),
        }
    } else {
        print_text_output(&result);
    }
    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Store: {}", result.path);
    println!();
    println!("File:");
    println!("  Size:    {}", format_bytes(result.size));
    println!("  Codec:   {}", result.codec);
    println!();
    println!("Entries:");
    println!("  Total:   {}", result.entry_count);
    println!("  With id: {}", result.with_id);
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::tempdir;

    #[test]
    fn inspect_counts_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"id":1},{"id":2},{"name":"x"}]"#).unwrap();

        let result = inspect(&path, Format::Json).unwrap();
        assert_eq!(result.entry_count, 3);
        assert_eq!(result.with_id, 2);
        assert_eq!(result.codec, "json");
        assert!(result.size > 0);
    }

    #[test]
    fn inspect_missing_store() {
        let dir = tempdir().unwrap();
        let err = inspect(&dir.path().join("none.json"), Format::Json).unwrap_err();
        assert!(matches!(err, CliError::MissingStore(_)));
    }

    #[test]
    fn inspect_malformed_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "[{").unwrap();

        let err = inspect(&path, Format::Json).unwrap_err();
        assert!(matches!(err, CliError::Reported { .. }));
    }

    #[test]
    fn bytes_are_human_readable() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }
}
