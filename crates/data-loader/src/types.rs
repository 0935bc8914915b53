//! Core domain types for the movie metadata corpus.
//!
//! Two CSV tables feed the corpus: `movies.csv` (one row per title with its
//! overview and encoded genre/keyword lists) and `credits.csv` (encoded cast
//! and crew lists keyed by title and, optionally, movie id). They are joined into [`RawMovie`] rows,
//! which keep the encoded fields untouched for the normalizer downstream.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier of a movie, taken from the `id` column of `movies.csv`
pub type MovieId = u32;

// =============================================================================
// CSV Rows
// =============================================================================

/// One row of `movies.csv`.
///
/// Every field is optional: empty cells deserialize to `None`, and an `id`
/// that isn't a number is treated the same as a missing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    /// Encoded list of `{"id": .., "name": ..}` entries
    #[serde(default)]
    pub genres: Option<String>,
    /// Encoded list of `{"id": .., "name": ..}` entries
    #[serde(default)]
    pub keywords: Option<String>,
}

/// One row of `credits.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditRow {
    /// Id of the movie these credits belong to, when the file carries one
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub movie_id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    /// Encoded cast records, in billing order
    #[serde(default)]
    pub cast: Option<String>,
    /// Encoded crew records, each with a `job`
    #[serde(default)]
    pub crew: Option<String>,
}

// =============================================================================
// Joined Records
// =============================================================================

/// A movie that survived the join with every required field present.
///
/// The structured fields are still in their encoded form; decoding them is
/// the normalizer's job and never drops the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMovie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: String,
    pub keywords: String,
    pub cast: String,
    pub crew: String,
}

impl RawMovie {
    /// Combine a movie row with one of its credit rows.
    ///
    /// Returns `None` when any required field is missing or the overview is
    /// blank, which is how incomplete records are kept out of the corpus.
    pub fn from_rows(movie: &MovieRow, credit: &CreditRow) -> Option<Self> {
        let overview = movie.overview.as_deref()?;
        if overview.trim().is_empty() {
            return None;
        }

        Some(Self {
            id: movie.id?,
            title: movie.title.clone()?,
            overview: overview.to_string(),
            genres: movie.genres.clone()?,
            keywords: movie.keywords.clone()?,
            cast: credit.cast.clone()?,
            crew: credit.crew.clone()?,
        })
    }

    /// The entry this movie contributes to the [`MovieTable`]
    pub fn entry(&self) -> MovieEntry {
        MovieEntry {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

// =============================================================================
// MovieTable
// =============================================================================

/// Identifier and title of one corpus movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEntry {
    pub id: MovieId,
    pub title: String,
}

/// The surviving movies in corpus order.
///
/// Row `i` of this table is row/column `i` of the similarity matrix, so the
/// order is fixed once built. Lookups by id and by lowercased title are
/// indexed; when a key appears more than once the earliest row wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MovieEntry>", into = "Vec<MovieEntry>")]
pub struct MovieTable {
    entries: Vec<MovieEntry>,
    by_id: HashMap<MovieId, usize>,
    by_title: HashMap<String, usize>,
}

impl MovieTable {
    /// Build the table and its lookup indices
    pub fn new(entries: Vec<MovieEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        let mut by_title = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id).or_insert(index);
            by_title
                .entry(entry.title.to_lowercase())
                .or_insert(index);
        }

        Self {
            entries,
            by_id,
            by_title,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a corpus position
    pub fn get(&self, index: usize) -> Option<&MovieEntry> {
        self.entries.get(index)
    }

    /// All entries, in corpus order
    pub fn entries(&self) -> &[MovieEntry] {
        &self.entries
    }

    /// Corpus position of a movie id
    pub fn position_of(&self, id: MovieId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Case-insensitive exact title lookup
    pub fn find_by_title(&self, title: &str) -> Option<&MovieEntry> {
        self.by_title
            .get(&title.trim().to_lowercase())
            .map(|&index| &self.entries[index])
    }

    /// Case-insensitive substring search.
    ///
    /// Exact matches come first, then partial matches; each group keeps
    /// corpus order.
    pub fn search(&self, query: &str) -> Vec<&MovieEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut exact = Vec::new();
        let mut partial = Vec::new();
        for entry in &self.entries {
            let title = entry.title.to_lowercase();
            if title == query {
                exact.push(entry);
            } else if title.contains(&query) {
                partial.push(entry);
            }
        }

        exact.extend(partial);
        exact
    }
}

impl From<Vec<MovieEntry>> for MovieTable {
    fn from(entries: Vec<MovieEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<MovieTable> for Vec<MovieEntry> {
    fn from(table: MovieTable) -> Self {
        table.entries
    }
}

impl PartialEq for MovieTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
