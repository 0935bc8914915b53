//! Names whose `job` equals a given role. Used to pull directors out of crew.

use crate::decode::Entry;
use crate::traits::FieldExtractor;

pub struct ByRole {
    job: String,
}

impl ByRole {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }

    pub fn directors() -> Self {
        Self::new("Director")
    }
}

impl FieldExtractor for ByRole {
    fn name(&self) -> &str {
        "ByRole"
    }

    fn select(&self, entries: Vec<Entry>) -> Vec<String> {
        entries
            .into_iter()
            .filter(|entry| entry.job.as_deref() == Some(self.job.as_str()))
            .map(|entry| entry.name)
            .collect()
    }
}
