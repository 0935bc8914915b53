//! Decoding of the encoded list-of-records columns.
//!
//! Columns like `genres` or `crew` hold a JSON array of objects, e.g.
//! `[{"id": 18, "name": "Drama"}]`. Only `name` (required) and `job`
//! (optional) are read; any other key is ignored.

use serde::Deserialize;
use thiserror::Error;

/// One entry of an encoded list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

/// The encoded value isn't a list of named records
#[derive(Debug, Error)]
#[error("malformed encoded field: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decode an encoded field into its entries, preserving source order
pub fn decode_entries(raw: &str) -> Result<Vec<Entry>, DecodeError> {
    Ok(serde_json::from_str(raw.trim())?)
}

/// Outcome of extracting names from one field.
///
/// `Empty` is the deliberate result for a value that couldn't be decoded;
/// `Parsed` may still hold an empty list when the source list was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Parsed(Vec<String>),
    Empty,
}

impl Extracted {
    /// Names for tag composition; an undecodable field contributes nothing
    pub fn into_names(self) -> Vec<String> {
        match self {
            Extracted::Parsed(names) => names,
            Extracted::Empty => Vec::new(),
        }
    }
}
