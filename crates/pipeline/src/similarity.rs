//! Pairwise cosine similarity over the count matrix.
//!
//! ## Algorithm
//! 1. Precompute every row norm
//! 2. Compute the strict upper triangle in parallel, one task per row
//! 3. Mirror it into a dense N×N matrix with 1.0 on the diagonal
//!
//! Each off-diagonal value is computed once and written to both cells, so
//! the matrix is exactly symmetric. A zero vector has similarity 0.0 with
//! every other movie.

use crate::vectorizer::{CountMatrix, FeatureVector};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
#[error("similarity matrix has {found} values, expected {n}x{n}")]
pub struct ShapeError {
    pub n: usize,
    pub found: usize,
}

/// Serialized form of a [`SimilarityMatrix`]
#[derive(Serialize, Deserialize)]
pub struct DenseMatrix {
    pub n: usize,
    pub values: Vec<f64>,
}

/// Dense, symmetric, row-major N×N similarity matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DenseMatrix", into = "DenseMatrix")]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl TryFrom<DenseMatrix> for SimilarityMatrix {
    type Error = ShapeError;

    fn try_from(raw: DenseMatrix) -> Result<Self, Self::Error> {
        Self::from_values(raw.n, raw.values)
    }
}

impl From<SimilarityMatrix> for DenseMatrix {
    fn from(matrix: SimilarityMatrix) -> Self {
        DenseMatrix {
            n: matrix.n,
            values: matrix.values,
        }
    }
}

impl SimilarityMatrix {
    /// Wrap row-major values, checking the shape
    pub fn from_values(n: usize, values: Vec<f64>) -> Result<Self, ShapeError> {
        if n.checked_mul(n) != Some(values.len()) {
            return Err(ShapeError {
                n,
                found: values.len(),
            });
        }
        Ok(Self { n, values })
    }

    /// Compute cosine similarity between every pair of rows
    #[instrument(skip_all, fields(rows = matrix.n_rows(), cols = matrix.n_cols()))]
    pub fn compute(matrix: &CountMatrix) -> Self {
        let rows = matrix.rows();
        let n = rows.len();
        let norms: Vec<f64> = rows.par_iter().map(FeatureVector::norm).collect();

        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| cosine(&rows[i], &rows[j], norms[i], norms[j]))
                    .collect()
            })
            .collect();

        let mut values = vec![0.0f64; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            values[i * n + i] = 1.0;
            for (offset, sim) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }

        info!("Computed {}x{} similarity matrix", n, n);
        Self { n, values }
    }

    /// Number of movies (rows and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.values[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}

/// Cosine similarity of two count vectors given their norms.
///
/// Zero vectors yield 0.0; the result is clamped into [0, 1] to absorb
/// rounding.
pub fn cosine(a: &FeatureVector, b: &FeatureVector, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = a.dot(b) as f64 / (norm_a * norm_b);
    sim.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::CountVectorizer;

    fn matrix(docs: &[&str]) -> SimilarityMatrix {
        let (_, counts) = CountVectorizer::new(100).fit_transform(docs);
        SimilarityMatrix::compute(&counts)
    }

    #[test]
    fn test_known_values() {
        let sim = matrix(&["spy car", "spy car", "spy heist", "ocean"]);

        assert!((sim.get(0, 1).unwrap() - 1.0).abs() < 1e-6);
        assert!((sim.get(0, 2).unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(sim.get(0, 3), Some(0.0));
    }

    #[test]
    fn test_scores_keep_full_precision() {
        let sim = matrix(&["spy car heist", "spy"]);
        assert!((sim.get(0, 1).unwrap() - 1.0 / 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_symmetry_and_range() {
        let sim = matrix(&[
            "spy car chase spy",
            "car heist chase",
            "ocean whale ocean",
            "spy whale",
            "",
        ]);

        for i in 0..sim.len() {
            let row = sim.row(i).unwrap();
            assert_eq!(row[i], 1.0);
            for j in 0..sim.len() {
                let v = sim.get(i, j).unwrap();
                assert!((0.0..=1.0).contains(&v));
                assert_eq!(v, sim.get(j, i).unwrap());
                assert!(row[i] >= v);
            }
        }
    }

    #[test]
    fn test_zero_vector_is_zero_not_nan() {
        let sim = matrix(&["spy car", "the and of"]);

        assert_eq!(sim.get(0, 1), Some(0.0));
        assert_eq!(sim.get(1, 0), Some(0.0));
        assert_eq!(sim.get(1, 1), Some(1.0));
    }

    #[test]
    fn test_out_of_range() {
        let sim = matrix(&["spy"]);
        assert!(sim.get(1, 0).is_none());
        assert!(sim.row(1).is_none());
    }

    #[test]
    fn test_shape_checked() {
        assert!(SimilarityMatrix::from_values(2, vec![1.0, 0.0, 0.0]).is_err());
        assert!(SimilarityMatrix::from_values(2, vec![1.0, 0.0, 0.0, 1.0]).is_ok());
    }
}
