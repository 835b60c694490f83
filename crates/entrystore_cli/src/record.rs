//! The record type the CLI stores.

use entrystore_core::Entry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Field that identifies a record.
pub const ID_FIELD: &str = "id";

/// A JSON value kept as one entry of the document.
///
/// Records carrying an `"id"` field are the same logical entry when their ids
/// are equal, whatever their other fields hold. Records without one only
/// match an identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Value);

impl Record {
    /// Parses a record from command-line JSON. Only objects are accepted.
    pub fn parse(text: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => Ok(Self(value)),
            Ok(other) => Err(format!("expected a JSON object, got {other}")),
            Err(err) => Err(err.to_string()),
        }
    }

    /// Builds a record that only carries an id, for lookups.
    ///
    /// The id is read as JSON when possible (`7` is a number), otherwise it
    /// is taken as a plain string.
    pub fn probe(id: &str) -> Self {
        let id = serde_json::from_str::<Value>(id).unwrap_or_else(|_| Value::String(id.to_string()));
        let mut object = serde_json::Map::new();
        object.insert(ID_FIELD.to_string(), id);
        Self(Value::Object(object))
    }

    /// Returns the record's id, if it has one.
    pub fn id(&self) -> Option<&Value> {
        self.0.get(ID_FIELD)
    }

    /// Renders the record as a single line of JSON.
    pub fn to_line(&self) -> String {
        self.0.to_string()
    }
}

impl Entry for Record {
    fn compare(&self, other: &Self) -> Ordering {
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_line().cmp(&other.to_line()),
        }
    }
}
