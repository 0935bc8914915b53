//! Corpus assembly: join the two metadata tables and drop incomplete rows.
//!
//! The join is an inner join on exact title. When a credits row carries a
//! `movie_id`, it only pairs with the movie of that id. Each movie id keeps
//! its first complete pairing, in `movies.csv` order first and `credits.csv`
//! order second; later pairings for the same id are dropped and counted.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Counts collected while joining, for logging and validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub movie_rows: usize,
    pub credit_rows: usize,
    /// Movie rows whose title had no credits row (or no title at all)
    pub unmatched: usize,
    /// Joined rows dropped for a missing required field or blank overview
    pub incomplete: usize,
    /// Complete pairings dropped because their movie id was already joined
    pub duplicates: usize,
    pub kept: usize,
}

/// The joined, filtered corpus in its raw (still encoded) form
#[derive(Debug, Clone, Default)]
pub struct RawCorpus {
    movies: Vec<RawMovie>,
    stats: JoinStats,
}

impl RawCorpus {
    /// Load `movies.csv` and `credits.csv` from a directory and join them
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading movie metadata from {:?}", data_dir);

        let movies_path = data_dir.join("movies.csv");
        let credits_path = data_dir.join("credits.csv");

        // The two files are independent, so parse them in parallel
        let (movies, credits) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_credits(&credits_path),
        );
        let movies = movies?;
        let credits = credits?;

        info!(
            "Read {} movie rows and {} credit rows",
            movies.len(),
            credits.len()
        );

        let corpus = Self::join(&movies, &credits);
        corpus.validate()?;

        info!(
            kept = corpus.stats.kept,
            unmatched = corpus.stats.unmatched,
            incomplete = corpus.stats.incomplete,
            duplicates = corpus.stats.duplicates,
            "Corpus assembled"
        );
        Ok(corpus)
    }

    /// Inner-join movie rows with credit rows on title, one row per movie id.
    pub fn join(movies: &[MovieRow], credits: &[CreditRow]) -> Self {
        let mut credits_by_title: HashMap<&str, Vec<&CreditRow>> = HashMap::new();
        for credit in credits {
            if let Some(title) = credit.title.as_deref() {
                credits_by_title.entry(title).or_default().push(credit);
            }
        }

        let mut stats = JoinStats {
            movie_rows: movies.len(),
            credit_rows: credits.len(),
            ..JoinStats::default()
        };
        let mut joined = Vec::with_capacity(movies.len());
        let mut seen: HashSet<MovieId> = HashSet::with_capacity(movies.len());

        for movie in movies {
            let matches: Vec<&CreditRow> = movie
                .title
                .as_deref()
                .and_then(|title| credits_by_title.get(title))
                .map(|credits| {
                    credits
                        .iter()
                        .copied()
                        .filter(|credit| {
                            credit.movie_id.is_none() || credit.movie_id == movie.id
                        })
                        .collect()
                })
                .unwrap_or_default();

            if matches.is_empty() {
                stats.unmatched += 1;
                continue;
            }

            for credit in matches {
                match RawMovie::from_rows(movie, credit) {
                    Some(raw) => {
                        if seen.insert(raw.id) {
                            joined.push(raw);
                        } else {
                            debug!(id = raw.id, title = %raw.title, "Dropping duplicate movie id");
                            stats.duplicates += 1;
                        }
                    }
                    None => {
                        debug!(title = ?movie.title, "Dropping incomplete record");
                        stats.incomplete += 1;
                    }
                }
            }
        }

        stats.kept = joined.len();
        Self {
            movies: joined,
            stats,
        }
    }

    /// Build a corpus directly from already-joined records
    pub fn from_movies(movies: Vec<RawMovie>) -> Self {
        let stats = JoinStats {
            kept: movies.len(),
            ..JoinStats::default()
        };
        Self { movies, stats }
    }

    /// Fail if nothing survived the join
    pub fn validate(&self) -> Result<()> {
        if self.movies.is_empty() {
            return Err(DataLoadError::ValidationError(format!(
                "no movies survived the join ({} movie rows, {} credit rows)",
                self.stats.movie_rows, self.stats.credit_rows
            )));
        }
        Ok(())
    }

    pub fn movies(&self) -> &[RawMovie] {
        &self.movies
    }

    pub fn stats(&self) -> JoinStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Id/title table in corpus order
    pub fn movie_table(&self) -> MovieTable {
        MovieTable::new(self.movies.iter().map(RawMovie::entry).collect())
    }
}
