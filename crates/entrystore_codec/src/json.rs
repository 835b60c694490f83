//! JSON array documents.

use crate::error::{CodecError, CodecResult};
use crate::{is_blank, DocumentCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Stores the whole document as a single JSON array.
///
/// Pretty output (the default) indents one entry per block, which keeps the
/// file diff-friendly when edited by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Creates a codec producing indented output.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Creates a codec producing single-line output.
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    /// Returns true if output is indented.
    #[must_use]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::pretty()
    }
}

impl<T> DocumentCodec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, entries: &[T]) -> CodecResult<String> {
        let result = if self.pretty {
            serde_json::to_string_pretty(entries)
        } else {
            serde_json::to_string(entries)
        };
        result.map_err(|e| CodecError::encoding_failed(e.to_string()))
    }

    fn decode(&self, document: &str) -> CodecResult<Vec<T>> {
        if is_blank(document) {
            return Ok(Vec::new());
        }
        serde_json::from_str(document).map_err(|e| CodecError::decoding_failed(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
