//! Field normalization: raw joined rows to [`MovieRecord`]s.

use crate::config::PipelineConfig;
use crate::extractors::{AllNames, ByRole, TopBilled};
use crate::traits::FieldExtractor;
use data_loader::{MovieId, RawMovie};

/// A movie with every structured field reduced to a flat list of names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    /// Top-billed cast
    pub cast: Vec<String>,
    /// Directors
    pub crew: Vec<String>,
}

/// Applies the per-column extraction rules
pub struct FieldNormalizer {
    genres: Box<dyn FieldExtractor>,
    keywords: Box<dyn FieldExtractor>,
    cast: Box<dyn FieldExtractor>,
    crew: Box<dyn FieldExtractor>,
}

impl FieldNormalizer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            genres: Box::new(AllNames),
            keywords: Box::new(AllNames),
            cast: Box::new(TopBilled::new(config.cast_limit)),
            crew: Box::new(ByRole::new(config.director_job.clone())),
        }
    }

    pub fn normalize(&self, raw: &RawMovie) -> MovieRecord {
        MovieRecord {
            id: raw.id,
            title: raw.title.clone(),
            overview: raw.overview.clone(),
            genres: self.genres.extract(&raw.genres).into_names(),
            keywords: self.keywords.extract(&raw.keywords).into_names(),
            cast: self.cast.extract(&raw.cast).into_names(),
            crew: self.crew.extract(&raw.crew).into_names(),
        }
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}
