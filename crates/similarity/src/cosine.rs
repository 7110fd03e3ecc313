//! Cosine similarity.
//!
//! ## Algorithm
//! cos(a, b) = (a . b) / (||a|| x ||b||)
//!
//! - any pair involving a zero vector is 0.0 (never NaN)
//! - the diagonal is exactly 1.0 for non-zero vectors
//! - every entry uses the same commutative formula, so the matrix is
//!   exactly symmetric
//!
//! Cost is O(N^2) dot products and O(N^2) memory; that is the scalability
//! ceiling of both recommenders.

use crate::matrix::SimilarityMatrix;
use crate::traits::{FeatureVector, SimilarityMeasure};
use rayon::prelude::*;
use tracing::info;

/// Cosine similarity between two rows, 0.0 when either is a zero vector.
pub fn cosine<V: FeatureVector>(a: &V, b: &V) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0)
}

/// Pairwise cosine similarity of all rows.
pub fn cosine_similarity<V: FeatureVector + Sync>(rows: &[V]) -> SimilarityMatrix {
    let norms: Vec<f32> = rows.par_iter().map(FeatureVector::norm).collect();

    let matrix: Vec<Vec<f32>> = rows
        .par_iter()
        .enumerate()
        .map(|(i, a)| {
            rows.iter()
                .enumerate()
                .map(|(j, b)| {
                    let denom = norms[i] * norms[j];
                    if denom == 0.0 {
                        0.0
                    } else if i == j {
                        1.0
                    } else {
                        (a.dot(b) / denom).clamp(-1.0, 1.0)
                    }
                })
                .collect()
        })
        .collect();

    info!(
        "Computed {}x{} cosine similarity matrix",
        rows.len(),
        rows.len()
    );
    SimilarityMatrix::from_rows(matrix)
}

/// The default `SimilarityMeasure`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl SimilarityMeasure for CosineSimilarity {
    fn name(&self) -> &str {
        "cosine"
    }

    fn pairwise<V: FeatureVector + Sync>(&self, rows: &[V]) -> SimilarityMatrix {
        cosine_similarity(rows)
    }
}
