//! The trained model: movie table, vocabulary and similarity matrix.
//!
//! A [`Model`] is produced by one pipeline run and never mutated afterwards.
//! It is persisted as three JSON files in an artifact directory.

use crate::config::PipelineConfig;
use crate::normalize::FieldNormalizer;
use crate::similarity::SimilarityMatrix;
use crate::tags::{TaggedMovie, build_tag_corpus};
use crate::vectorizer::{CountVectorizer, Vocabulary};
use anyhow::{Context, Result};
use data_loader::{MovieTable, RawCorpus};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

pub const MOVIE_LIST_FILE: &str = "movie_list.json";
pub const VOCABULARY_FILE: &str = "vocabulary.json";
pub const SIMILARITY_FILE: &str = "similarity.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Movie table has {movies} rows but similarity matrix is {matrix}x{matrix}")]
    RowMismatch { movies: usize, matrix: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    movies: MovieTable,
    vocabulary: Vocabulary,
    similarity: SimilarityMatrix,
}

impl Model {
    /// Assemble a model from its parts, checking that rows line up
    pub fn new(
        movies: MovieTable,
        vocabulary: Vocabulary,
        similarity: SimilarityMatrix,
    ) -> Result<Self, ArtifactError> {
        if movies.len() != similarity.len() {
            return Err(ArtifactError::RowMismatch {
                movies: movies.len(),
                matrix: similarity.len(),
            });
        }
        Ok(Self {
            movies,
            vocabulary,
            similarity,
        })
    }

    /// Run the whole offline pipeline over a joined corpus
    pub fn build(corpus: &RawCorpus, config: &PipelineConfig) -> Result<Self> {
        let start = Instant::now();

        let normalizer = FieldNormalizer::new(config);
        let tagged = build_tag_corpus(corpus.movies(), &normalizer);
        let model = Self::from_tagged(&tagged, config)?;

        info!(
            movies = model.movies.len(),
            vocabulary = model.vocabulary.len(),
            "Model built in {:?}",
            start.elapsed()
        );
        Ok(model)
    }

    /// Vectorize already-composed tag strings and compute similarities
    pub fn from_tagged(tagged: &[TaggedMovie], config: &PipelineConfig) -> Result<Self> {
        let documents: Vec<&str> = tagged.iter().map(|movie| movie.tags.as_str()).collect();

        let (vocabulary, counts) = CountVectorizer::from_config(config).fit_transform(&documents);
        let zero_rows = counts.rows().iter().filter(|row| row.is_zero()).count();
        if zero_rows > 0 {
            debug!(zero_rows, "Movies with no vocabulary tokens score 0.0 against all others");
        }
        let similarity = SimilarityMatrix::compute(&counts);
        let movies = MovieTable::new(tagged.iter().map(TaggedMovie::entry).collect());

        Ok(Self::new(movies, vocabulary, similarity)?)
    }

    pub fn movies(&self) -> &MovieTable {
        &self.movies
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Write the three artifacts into `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Creating artifact directory {}", dir.display()))?;

        write_json(&dir.join(MOVIE_LIST_FILE), &self.movies)?;
        write_json(&dir.join(VOCABULARY_FILE), &self.vocabulary)?;
        write_json(&dir.join(SIMILARITY_FILE), &self.similarity)?;

        info!("Saved model artifacts to {}", dir.display());
        Ok(())
    }

    /// Read artifacts written by [`Model::save`]
    pub fn load(dir: &Path) -> Result<Self> {
        let start = Instant::now();

        let movies: MovieTable = read_json(&dir.join(MOVIE_LIST_FILE))?;
        let vocabulary: Vocabulary = read_json(&dir.join(VOCABULARY_FILE))?;
        let similarity: SimilarityMatrix = read_json(&dir.join(SIMILARITY_FILE))?;
        let model = Self::new(movies, vocabulary, similarity)?;

        info!(
            movies = model.movies.len(),
            "Loaded model from {} in {:?}",
            dir.display(),
            start.elapsed()
        );
        Ok(model)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let io_err = |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|source| ArtifactError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Format {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawMovie;

    fn raw(id: u32, title: &str, overview: &str, genre: &str) -> RawMovie {
        RawMovie {
            id,
            title: title.to_string(),
            overview: overview.to_string(),
            genres: format!(r#"[{{"id": 1, "name": "{genre}"}}]"#),
            keywords: "[]".to_string(),
            cast: "[]".to_string(),
            crew: "[]".to_string(),
        }
    }

    fn corpus() -> RawCorpus {
        RawCorpus::from_movies(vec![
            raw(1, "Alien", "A crew meets a creature in space", "Science Fiction"),
            raw(2, "Aliens", "Marines fight creatures in space", "Science Fiction"),
            raw(3, "Heat", "A detective hunts a thief", "Crime"),
        ])
    }

    #[test]
    fn test_build_shapes() {
        let model = Model::build(&corpus(), &PipelineConfig::default()).unwrap();

        assert_eq!(model.movies().len(), 3);
        assert_eq!(model.similarity().len(), 3);
        assert_eq!(model.movies().get(2).unwrap().title, "Heat");
        assert!(model.vocabulary().position("ScienceFiction").is_some());
    }

    #[test]
    fn test_save_load_round_trip() {
        let model = Model::build(&corpus(), &PipelineConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        model.save(dir.path()).unwrap();
        let loaded = Model::load(dir.path()).unwrap();

        assert_eq!(loaded, model);
        assert_eq!(loaded.movies().position_of(3), Some(2));
    }

    #[test]
    fn test_row_mismatch_rejected() {
        let model = Model::build(&corpus(), &PipelineConfig::default()).unwrap();
        let fewer = MovieTable::new(model.movies().entries()[..2].to_vec());

        let err = Model::new(fewer, model.vocabulary().clone(), model.similarity().clone()).unwrap_err();
        assert!(matches!(err, ArtifactError::RowMismatch { movies: 2, matrix: 3 }));
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Model::load(&dir.path().join("nope")).is_err());
    }
}
