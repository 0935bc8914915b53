//! The first `limit` names by billing order. Used for cast.

use crate::decode::Entry;
use crate::traits::FieldExtractor;

pub struct TopBilled {
    limit: usize,
}

impl TopBilled {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl FieldExtractor for TopBilled {
    fn name(&self) -> &str {
        "TopBilled"
    }

    fn select(&self, entries: Vec<Entry>) -> Vec<String> {
        entries
            .into_iter()
            .take(self.limit)
            .map(|entry| entry.name)
            .collect()
    }
}
