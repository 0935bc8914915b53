//! Count vectorization of tag strings.
//!
//! ## Algorithm
//! 1. Split every tag string on whitespace (optionally lowercasing)
//! 2. Count each non-stopword token across the whole corpus, remembering
//!    where it first appeared
//! 3. Keep the `max_features` most frequent tokens; ties go to the token
//!    that appeared first. Selection rank is the vocabulary position
//! 4. Map each movie to its count of every vocabulary token

use crate::config::PipelineConfig;
use crate::stopwords::is_stopword;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

// =============================================================================
// Vocabulary
// =============================================================================

/// Frozen bijection between selected tokens and vector positions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    tokens: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new(tokens: Vec<String>) -> Self {
        let positions = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| (token.clone(), position))
            .collect();
        Self { tokens, positions }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self, token: &str) -> Option<usize> {
        self.positions.get(token).copied()
    }

    /// Tokens in position order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.tokens
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

// =============================================================================
// Feature vectors
// =============================================================================

/// Token counts of one movie over the vocabulary.
///
/// Stored sparsely as `(position, count)` pairs sorted by position; the
/// logical length is always the vocabulary size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, u32)>,
}

impl FeatureVector {
    fn from_counts(dim: usize, counts: HashMap<usize, u32>) -> Self {
        let mut entries: Vec<(usize, u32)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|&(position, _)| position);
        Self { dim, entries }
    }

    /// Length of the vector (the vocabulary size)
    pub fn len(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// True when no vocabulary token occurs in the movie
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dot(&self, other: &FeatureVector) -> u64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0u64;
        while i < self.entries.len() && j < other.entries.len() {
            let (pa, ca) = self.entries[i];
            let (pb, cb) = other.entries[j];
            if pa == pb {
                sum += ca as u64 * cb as u64;
                i += 1;
                j += 1;
            } else if pa < pb {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, c)| (c as f64) * (c as f64))
            .sum::<f64>()
            .sqrt()
    }
}

/// N×V count matrix, one row per movie in corpus order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMatrix {
    dim: usize,
    rows: Vec<FeatureVector>,
}

impl CountMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Vocabulary size shared by every row
    pub fn n_cols(&self) -> usize {
        self.dim
    }

    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }
}

// =============================================================================
// CountVectorizer
// =============================================================================

/// Corpus-wide count and first position `(document, token)` of a token
type TokenStats = HashMap<String, (u64, (usize, usize))>;

#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
    lowercase: bool,
}

impl CountVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            lowercase: false,
        }
    }

    /// Configure case folding (default: false)
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.max_features).with_lowercase(config.lowercase)
    }

    fn tokenize<'a>(&self, document: &'a str) -> impl Iterator<Item = Cow<'a, str>> + 'a {
        let lowercase = self.lowercase;
        document.split_whitespace().map(move |token| {
            if lowercase {
                Cow::Owned(token.to_lowercase())
            } else {
                Cow::Borrowed(token)
            }
        })
    }

    fn count_document(&self, doc_index: usize, document: &str, mut stats: TokenStats) -> TokenStats {
        for (token_index, token) in self.tokenize(document).enumerate() {
            if is_stopword(&token) {
                continue;
            }
            let first = (doc_index, token_index);
            match stats.get_mut(&*token) {
                Some((count, seen)) => {
                    *count += 1;
                    *seen = (*seen).min(first);
                }
                None => {
                    stats.insert(token.into_owned(), (1, first));
                }
            }
        }
        stats
    }

    fn merge(mut left: TokenStats, right: TokenStats) -> TokenStats {
        for (token, (count, first)) in right {
            left.entry(token)
                .and_modify(|(c, f)| {
                    *c += count;
                    *f = (*f).min(first);
                })
                .or_insert((count, first));
        }
        left
    }

    /// Build the vocabulary from the full corpus
    #[instrument(skip_all, fields(documents = documents.len(), max_features = self.max_features))]
    pub fn fit<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vocabulary {
        let stats = documents
            .par_iter()
            .enumerate()
            .fold(TokenStats::new, |stats, (i, doc)| {
                self.count_document(i, doc.as_ref(), stats)
            })
            .reduce(TokenStats::new, Self::merge);

        debug!("Counted {} distinct non-stopword tokens", stats.len());

        let mut ranked: Vec<(String, u64, (usize, usize))> = stats
            .into_iter()
            .map(|(token, (count, first))| (token, count, first))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(self.max_features);

        let vocabulary = Vocabulary::new(ranked.into_iter().map(|(token, _, _)| token).collect());
        info!("Built vocabulary of {} tokens", vocabulary.len());
        vocabulary
    }

    /// Count vector of one document; tokens outside the vocabulary are ignored
    pub fn transform(&self, vocabulary: &Vocabulary, document: &str) -> FeatureVector {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for token in self.tokenize(document) {
            if let Some(position) = vocabulary.position(&token) {
                *counts.entry(position).or_insert(0) += 1;
            }
        }
        FeatureVector::from_counts(vocabulary.len(), counts)
    }

    pub fn transform_all<S: AsRef<str> + Sync>(
        &self,
        vocabulary: &Vocabulary,
        documents: &[S],
    ) -> CountMatrix {
        let rows = documents
            .par_iter()
            .map(|doc| self.transform(vocabulary, doc.as_ref()))
            .collect();
        CountMatrix {
            dim: vocabulary.len(),
            rows,
        }
    }

    pub fn fit_transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> (Vocabulary, CountMatrix) {
        let vocabulary = self.fit(documents);
        let matrix = self.transform_all(&vocabulary, documents);
        (vocabulary, matrix)
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::stopwords;

    #[test]
    fn test_frequency_then_first_appearance() {
        let docs = ["spy car spy", "chase car", "heist chase"];
        let vocabulary = CountVectorizer::new(10).fit(&docs);

        // spy, car, chase all appear twice; order by first appearance
        assert_eq!(vocabulary.tokens(), &["spy", "car", "chase", "heist"]);
    }

    #[test]
    fn test_max_features_bound() {
        let docs = ["alpha beta gamma delta", "alpha beta", "alpha"];
        let vocabulary = CountVectorizer::new(2).fit(&docs);

        assert_eq!(vocabulary.tokens(), &["alpha", "beta"]);
    }

    #[test]
    fn test_stopwords_excluded() {
        let docs = ["The spy and the car", "THE END of it"];
        let vocabulary = CountVectorizer::new(100).fit(&docs);

        for word in stopwords() {
            assert!(vocabulary.position(word).is_none(), "{word} in vocabulary");
        }
        assert!(vocabulary.position("The").is_none());
        assert!(vocabulary.position("THE").is_none());
        assert_eq!(vocabulary.tokens(), &["spy", "car", "END"]);
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let docs = ["Spy spy"];
        let vocabulary = CountVectorizer::new(10).fit(&docs);
        assert_eq!(vocabulary.len(), 2);

        let folded = CountVectorizer::new(10).with_lowercase(true).fit(&docs);
        assert_eq!(folded.tokens(), &["spy"]);
    }

    #[test]
    fn test_transform_counts_and_drops_unknown() {
        let vectorizer = CountVectorizer::new(10);
        let vocabulary = vectorizer.fit(&["spy car spy", "chase"]);

        let vector = vectorizer.transform(&vocabulary, "spy spy spy unknown chase");
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.entries, vec![(0, 3), (2, 1)]);

        let empty = vectorizer.transform(&vocabulary, "nothing known");
        assert!(empty.is_zero());
        assert_eq!(empty.len(), 3);
    }

    #[test]
    fn test_fit_transform_shape() {
        let docs = vec!["a spy story".to_string(), "a car story".to_string(), "".to_string()];
        let (vocabulary, matrix) = CountVectorizer::default().fit_transform(&docs);

        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_cols(), vocabulary.len());
        assert!(matrix.rows().iter().all(|row| row.len() == vocabulary.len()));
        assert!(matrix.rows()[2].is_zero());
    }

    #[test]
    fn test_dot_and_norm() {
        let vectorizer = CountVectorizer::new(10);
        let vocabulary = vectorizer.fit(&["x y z"]);
        let a = vectorizer.transform(&vocabulary, "x x y");
        let b = vectorizer.transform(&vocabulary, "x z");

        assert_eq!(a.dot(&b), 2);
        assert!((a.norm() - 5f64.sqrt()).abs() < 1e-12);
    }
}
