//! Tag composition: one space-joined token string per movie.

use crate::collapse::collapse_tokens;
use crate::normalize::{FieldNormalizer, MovieRecord};
use data_loader::{MovieEntry, MovieId, RawMovie};
use rayon::prelude::*;
use tracing::{info, instrument};

/// A movie's sole textual representation for vectorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedMovie {
    pub id: MovieId,
    pub title: String,
    pub tags: String,
}

impl TaggedMovie {
    pub fn entry(&self) -> MovieEntry {
        MovieEntry {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Overview words, then genres, keywords, cast and crew, joined by single spaces.
///
/// Overview words are kept exactly as written (case and punctuation); the
/// list fields are collapsed first.
pub fn compose_tags(record: MovieRecord) -> TaggedMovie {
    let mut tokens: Vec<String> = record
        .overview
        .split_whitespace()
        .map(str::to_string)
        .collect();

    tokens.extend(collapse_tokens(record.genres));
    tokens.extend(collapse_tokens(record.keywords));
    tokens.extend(collapse_tokens(record.cast));
    tokens.extend(collapse_tokens(record.crew));

    // A name made only of spaces collapses to "" and must not leave a double space
    tokens.retain(|token| !token.is_empty());

    TaggedMovie {
        id: record.id,
        title: record.title,
        tags: tokens.join(" "),
    }
}

/// Normalize and tag every movie in parallel, keeping corpus order
#[instrument(skip_all, fields(movies = movies.len()))]
pub fn build_tag_corpus(movies: &[RawMovie], normalizer: &FieldNormalizer) -> Vec<TaggedMovie> {
    let tagged: Vec<TaggedMovie> = movies
        .par_iter()
        .map(|raw| compose_tags(normalizer.normalize(raw)))
        .collect();

    info!("Composed tags for {} movies", tagged.len());
    tagged
}
