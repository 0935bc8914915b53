//! Server crate for the ReelMatch recommendation engine.
//!
//! This crate contains the service that answers a title query with five
//! similar movies, each decorated with poster and description.

pub mod orchestrator;

pub use orchestrator::{EnrichedRecommendation, RecommendationService, ServiceError};
