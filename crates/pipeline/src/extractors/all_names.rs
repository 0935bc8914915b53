//! Every name, in source order. Used for genres and keywords.

use crate::decode::Entry;
use crate::traits::FieldExtractor;

pub struct AllNames;

impl FieldExtractor for AllNames {
    fn name(&self) -> &str {
        "AllNames"
    }

    fn select(&self, entries: Vec<Entry>) -> Vec<String> {
        entries.into_iter().map(|entry| entry.name).collect()
    }
}
