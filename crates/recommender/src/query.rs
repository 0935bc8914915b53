//! Recommender query over a precomputed similarity model.
//!
//! ## Algorithm
//! 1. Resolve the movie id to its corpus row
//! 2. Read that row of the similarity matrix
//! 3. Rank every other movie by score, highest first; equal scores keep
//!    corpus order
//! 4. Skip any row that shares the query's movie id
//! 5. Return the first `top_k`

use crate::error::QueryError;
use data_loader::{MovieId, MovieTable};
use pipeline::{Model, PipelineConfig};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Recommendations returned per query unless configured otherwise
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked result
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Corpus row of the recommended movie
    pub index: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
}

/// Serves similar-movie queries from a shared, read-only model
#[derive(Clone)]
pub struct Recommender {
    model: Arc<Model>,
    top_k: usize,
}

impl Recommender {
    pub fn new(model: Arc<Model>) -> Self {
        Self {
            model,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Recommender sized by the `top_k` setting of a pipeline config
    pub fn from_config(model: Arc<Model>, config: &PipelineConfig) -> Self {
        Self::new(model).with_top_k(config.top_k)
    }

    /// Configure how many results a query returns (default: 5)
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn movies(&self) -> &MovieTable {
        self.model.movies()
    }

    /// Movies most similar to `id`, excluding `id` itself
    #[instrument(skip(self))]
    pub fn recommend(&self, id: MovieId) -> Result<Vec<Recommendation>, QueryError> {
        let movies = self.model.movies();
        let index = movies.position_of(id).ok_or(QueryError::NotFound { id })?;
        let row = self
            .model
            .similarity()
            .row(index)
            .ok_or(QueryError::NotFound { id })?;

        let recommendations: Vec<Recommendation> = rank_row(row, index, row.len())
            .into_iter()
            .filter_map(|(other, score)| {
                movies
                    .get(other)
                    .filter(|entry| entry.id != id)
                    .map(|entry| Recommendation {
                        index: other,
                        movie_id: entry.id,
                        title: entry.title.clone(),
                        score,
                    })
            })
            .take(self.top_k)
            .collect();

        debug!("Found {} recommendations", recommendations.len());
        Ok(recommendations)
    }

    /// Resolve a title (case-insensitive) and recommend for it
    pub fn recommend_by_title(&self, title: &str) -> Result<Vec<Recommendation>, QueryError> {
        let entry = self
            .model
            .movies()
            .find_by_title(title)
            .ok_or_else(|| QueryError::TitleNotFound {
                title: title.to_string(),
            })?;
        self.recommend(entry.id)
    }
}

/// Rank a similarity row, skipping `exclude`.
///
/// Scores descend; ties go to the lower corpus index.
pub fn rank_row(row: &[f64], exclude: usize, k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .collect();

    ranked.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
    ranked.truncate(k);
    ranked
}
