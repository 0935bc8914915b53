//! Query errors.

use data_loader::MovieId;
use thiserror::Error;

/// Failures surfaced to callers of the recommender.
///
/// An unknown movie is always an error, never an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Movie {id} not found in corpus")]
    NotFound { id: MovieId },

    #[error("No movie titled '{title}' in corpus")]
    TitleNotFound { title: String },
}
