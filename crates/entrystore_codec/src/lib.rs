//! # EntryStore Codec
//!
//! Document codecs for EntryStore.
//!
//! A codec turns an ordered sequence of entries into a single text document
//! and back. The store only depends on the [`DocumentCodec`] trait; this crate
//! ships two human-readable implementations:
//!
//! - [`JsonCodec`] - the whole document is one JSON array
//! - [`JsonLinesCodec`] - one JSON value per line
//!
//! ## Blank documents
//!
//! Every codec must treat an empty or whitespace-only document as a valid
//! document with zero entries. A freshly created store file is empty, so a
//! codec that rejects blank input would turn every new store into a decode
//! failure.
//!
//! ## Usage
//!
//! ```
//! use entrystore_codec::{DocumentCodec, JsonCodec};
//!
//! let codec = JsonCodec::compact();
//! let text = codec.encode(&[1u32, 2, 3]).unwrap();
//! assert_eq!(text, "[1,2,3]");
//!
//! let back: Vec<u32> = codec.decode(&text).unwrap();
//! assert_eq!(back, vec![1, 2, 3]);
//!
//! let empty: Vec<u32> = codec.decode("  \n").unwrap();
//! assert!(empty.is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod json;
mod lines;

pub use error::{CodecError, CodecResult};
pub use json::JsonCodec;
pub use lines::JsonLinesCodec;

/// Converts an ordered sequence of entries to a text document and back.
///
/// # Invariants
///
/// - `decode(encode(s))` yields a sequence equal to `s`
/// - Encoding is deterministic for equal inputs
/// - A blank document decodes to an empty sequence
pub trait DocumentCodec<T>: Send + Sync {
    /// Encodes the entries, in order, into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry cannot be represented in this format.
    fn encode(&self, entries: &[T]) -> CodecResult<String>;

    /// Decodes a document into its entries, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not blank and is malformed.
    fn decode(&self, document: &str) -> CodecResult<Vec<T>>;

    /// Short format name used in diagnostics.
    fn name(&self) -> &'static str;
}

impl<T, C> DocumentCodec<T> for Box<C>
where
    C: DocumentCodec<T> + ?Sized,
{
    fn encode(&self, entries: &[T]) -> CodecResult<String> {
        (**self).encode(entries)
    }

    fn decode(&self, document: &str) -> CodecResult<Vec<T>> {
        (**self).decode(document)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Returns true if the document holds no entries by definition.
#[must_use]
pub fn is_blank(document: &str) -> bool {
    document.trim().is_empty()
}
