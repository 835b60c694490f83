//! Line-delimited JSON documents.

use crate::error::{CodecError, CodecResult};
use crate::DocumentCodec;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Stores one compact JSON value per line.
///
/// Blank lines are ignored on decode. Errors name the offending line so a
/// hand-edited file can be fixed without guessing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonLinesCodec;

impl<T> DocumentCodec<T> for JsonLinesCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, entries: &[T]) -> CodecResult<String> {
        let mut out = String::new();
        for entry in entries {
            let line =
                serde_json::to_string(entry).map_err(|e| CodecError::encoding_failed(e.to_string()))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    fn decode(&self, document: &str) -> CodecResult<Vec<T>> {
        document
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| CodecError::invalid_line(idx + 1, e.to_string()))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "jsonl"
    }
}
