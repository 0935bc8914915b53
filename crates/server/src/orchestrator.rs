//! # Recommendation Service
//!
//! Coordinates one request end to end:
//! 1. Resolve the title and rank similar movies (blocking pool)
//! 2. Fetch details for every result concurrently
//! 3. Reassemble in rank order
//!
//! Enrichment never fails a request. A lookup task that dies is replaced by
//! placeholder details.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, instrument, warn};

use data_loader::MovieId;
use metadata_client::{DetailsProvider, MovieDetails};
use pipeline::Model;
use recommender::{QueryError, Recommender};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Recommendation task failed: {0}")]
    Task(#[from] JoinError),
}

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f64,
    pub details: MovieDetails,
}

pub struct RecommendationService<P> {
    recommender: Recommender,
    provider: Arc<P>,
}

impl<P> Clone for RecommendationService<P> {
    fn clone(&self) -> Self {
        Self {
            recommender: self.recommender.clone(),
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: DetailsProvider> RecommendationService<P> {
    pub fn new(model: Arc<Model>, provider: P) -> Self {
        Self::from_recommender(Recommender::new(model), provider)
    }

    pub fn from_recommender(recommender: Recommender, provider: P) -> Self {
        Self {
            recommender,
            provider: Arc::new(provider),
        }
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Main entry point: similar movies for a title, with details
    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        title: &str,
    ) -> Result<Vec<EnrichedRecommendation>, ServiceError> {
        let start_time = Instant::now();

        // Ranking is CPU-bound; keep it off the async workers
        let ranked = tokio::task::spawn_blocking({
            let recommender = self.recommender.clone();
            let title = title.to_string();
            move || recommender.recommend_by_title(&title)
        })
        .await??;

        let handles: Vec<_> = ranked
            .iter()
            .map(|rec| {
                let provider = Arc::clone(&self.provider);
                let movie_id = rec.movie_id;
                tokio::spawn(async move { provider.fetch_details(movie_id).await })
            })
            .collect();

        let mut results = Vec::with_capacity(ranked.len());
        for (position, (rec, handle)) in ranked.into_iter().zip(handles).enumerate() {
            let details = handle.await.unwrap_or_else(|e| {
                warn!(movie_id = rec.movie_id, "Details lookup task failed: {}", e);
                MovieDetails::placeholder()
            });
            results.push(EnrichedRecommendation {
                rank: position + 1,
                movie_id: rec.movie_id,
                title: rec.title,
                score: rec.score,
                details,
            });
        }

        info!(
            "Served {} recommendations in {:.2?}",
            results.len(),
            start_time.elapsed()
        );
        Ok(results)
    }
}
