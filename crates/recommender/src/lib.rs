//! # Recommender Crate
//!
//! Answers "movies like this one" from a precomputed [`pipeline::Model`].
//!
//! The model is wrapped in an `Arc` and only ever read, so one
//! [`Recommender`] can be cloned into as many concurrent callers as needed
//! without locking.
//!
//! ## Example Usage
//!
//! ```ignore
//! use pipeline::Model;
//! use recommender::Recommender;
//! use std::sync::Arc;
//!
//! let model = Arc::new(Model::load(Path::new("artifacts"))?);
//! let recommender = Recommender::new(model);
//!
//! for rec in recommender.recommend_by_title("Avatar")? {
//!     println!("{} ({:.3})", rec.title, rec.score);
//! }
//! ```

pub mod error;
pub mod query;

// Re-export commonly used types
pub use error::QueryError;
pub use query::{DEFAULT_TOP_K, Recommendation, Recommender, rank_row};
