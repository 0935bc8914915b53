//! Offline feature pipeline: from raw metadata rows to a similarity model.
//!
//! This crate provides:
//! - FieldExtractor trait and implementations for the encoded list columns
//! - FieldNormalizer, token collapsing and tag composition
//! - CountVectorizer for the bag-of-words representation
//! - SimilarityMatrix for pairwise cosine similarity
//! - Model, the immutable artifact the query side consumes
//!
//! ## Architecture
//! The pipeline processes the corpus in stages:
//! 1. Normalize each movie's structured fields into name lists
//! 2. Collapse multi-word names and compose one tag string per movie
//! 3. Fit a vocabulary over all tag strings and count tokens per movie
//! 4. Compute cosine similarity for every pair of movies
//!
//! Steps 1-2 run per movie in parallel; 3 and 4 need the whole corpus.
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::RawCorpus;
//! use pipeline::{Model, PipelineConfig};
//!
//! let corpus = RawCorpus::load_from_files(Path::new("data/tmdb"))?;
//! let model = Model::build(&corpus, &PipelineConfig::default())?;
//! model.save(Path::new("artifacts"))?;
//! ```

pub mod collapse;
pub mod config;
pub mod decode;
pub mod extractors;
pub mod model;
pub mod normalize;
pub mod similarity;
pub mod stopwords;
pub mod tags;
pub mod traits;
pub mod vectorizer;

// Re-export main types
pub use collapse::collapse_tokens;
pub use config::{ConfigError, PipelineConfig};
pub use decode::{DecodeError, Entry, Extracted};
pub use model::{ArtifactError, Model};
pub use normalize::{FieldNormalizer, MovieRecord};
pub use similarity::SimilarityMatrix;
pub use tags::{TaggedMovie, build_tag_corpus, compose_tags};
pub use traits::FieldExtractor;
pub use vectorizer::{CountMatrix, CountVectorizer, FeatureVector, Vocabulary};
