//! Client for the external movie metadata service.
//!
//! Looks up a poster image and a description for a movie id. The service is
//! optional decoration: every failure path degrades to placeholder values
//! through [`DetailsProvider`], so callers never see an error from here
//! unless they call [`TmdbClient::fetch`] directly.

use data_loader::MovieId;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/500x750?text=No+Poster";
pub const PLACEHOLDER_DESCRIPTION: &str = "Description not available.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Metadata service returned status {0}")]
    Status(u16),
}

/// Poster and description for one movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDetails {
    pub poster_url: String,
    pub description: String,
}

impl MovieDetails {
    pub fn placeholder() -> Self {
        Self {
            poster_url: PLACEHOLDER_POSTER.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
        }
    }
}

/// The subset of the details payload we read
#[derive(Debug, Default, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// Turn a details payload into display values, filling gaps with placeholders
pub fn details_from_response(response: DetailsResponse) -> MovieDetails {
    let poster_url = match response.poster_path.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => {
            format!("{}{}", POSTER_BASE_URL, path.trim_start_matches('/'))
        }
        _ => PLACEHOLDER_POSTER.to_string(),
    };

    let description = match response.overview {
        Some(overview) if !overview.trim().is_empty() => overview,
        _ => PLACEHOLDER_DESCRIPTION.to_string(),
    };

    MovieDetails {
        poster_url,
        description,
    }
}

/// Anything that can decorate a recommendation with details.
///
/// Implementations must not fail; a lookup that goes wrong yields
/// [`MovieDetails::placeholder`].
pub trait DetailsProvider: Send + Sync + 'static {
    fn fetch_details(&self, id: MovieId) -> impl Future<Output = MovieDetails> + Send;
}

/// HTTP client for the TMDB movie details endpoint
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, MetadataError> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Point the client at a different service root (no trailing slash)
    pub fn with_base_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Details endpoint for a movie, without the query string
    pub fn details_url(&self, id: MovieId) -> String {
        format!("{}/movie/{}", self.api_url, id)
    }

    /// Fetch details, surfacing transport and status failures
    pub async fn fetch(&self, id: MovieId) -> Result<MovieDetails, MetadataError> {
        debug!(movie_id = id, "Fetching movie details");

        let response = self
            .http_client
            .get(self.details_url(id))
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetadataError::Status(response.status().as_u16()));
        }

        let payload: DetailsResponse = response.json().await?;
        Ok(details_from_response(payload))
    }

    /// Fetch details, falling back to placeholders on any failure
    pub async fn details_or_placeholder(&self, id: MovieId) -> MovieDetails {
        match self.fetch(id).await {
            Ok(details) => details,
            Err(e) => {
                warn!(movie_id = id, "Using placeholder details: {}", e);
                MovieDetails::placeholder()
            }
        }
    }
}

impl DetailsProvider for TmdbClient {
    fn fetch_details(&self, id: MovieId) -> impl Future<Output = MovieDetails> + Send {
        self.details_or_placeholder(id)
    }
}
