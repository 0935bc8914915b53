//! Core traits for field normalization.
//!
//! Each structured column gets a [`FieldExtractor`] that decides which
//! entries of the decoded list contribute names.

use crate::decode::{Entry, Extracted, decode_entries};
use tracing::debug;

/// Turns an encoded list column into an ordered list of names.
///
/// ## Design Note
/// - `Send + Sync` so a normalizer can be shared across rayon workers
/// - Implementors only choose entries; decoding and the malformed-input
///   fallback are shared in [`FieldExtractor::extract`]
pub trait FieldExtractor: Send + Sync {
    /// Returns the name of this extractor (for logging/debugging)
    fn name(&self) -> &str;

    /// Pick names out of the decoded entries, preserving source order
    fn select(&self, entries: Vec<Entry>) -> Vec<String>;

    /// Decode `raw` and select names.
    ///
    /// Never fails: a value that can't be decoded yields [`Extracted::Empty`].
    fn extract(&self, raw: &str) -> Extracted {
        match decode_entries(raw) {
            Ok(entries) => Extracted::Parsed(self.select(entries)),
            Err(err) => {
                debug!(extractor = self.name(), %err, "Field resolved to empty");
                Extracted::Empty
            }
        }
    }
}
