//! # Data Loader Crate
//!
//! Loads the movie metadata corpus (`movies.csv` + `credits.csv`) and turns it
//! into the joined, filtered rows the feature pipeline consumes.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRow, CreditRow, RawMovie, MovieTable)
//! - **parser**: Parse the CSV files into Rust structs
//! - **index**: Join the two tables on title and drop incomplete records
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RawCorpus;
//! use std::path::Path;
//!
//! let corpus = RawCorpus::load_from_files(Path::new("data/tmdb"))?;
//! let table = corpus.movie_table();
//!
//! println!("{} movies survived the join", table.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{JoinStats, RawCorpus};
pub use types::{CreditRow, MovieEntry, MovieId, MovieRow, MovieTable, RawMovie};
