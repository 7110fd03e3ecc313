//! Core traits for similarity computation.
//!
//! `FeatureVector` abstracts over sparse and dense rows; `SimilarityMeasure`
//! is the seam recommenders build their matrices through, so another
//! measure (or an approximate nearest-neighbour backend) can replace cosine
//! without touching recommend-time code.

use crate::matrix::SimilarityMatrix;
use features::SparseVector;

/// A row that can take part in inner-product based similarity.
pub trait FeatureVector {
    /// Inner product with another row of the same kind
    fn dot(&self, other: &Self) -> f32;

    /// Squared L2 norm
    fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }
}

impl FeatureVector for SparseVector {
    /// Merge-join over the sorted index lists
    fn dot(&self, other: &Self) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn norm_squared(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum()
    }
}

impl FeatureVector for Vec<f32> {
    fn dot(&self, other: &Self) -> f32 {
        self.iter().zip(other.iter()).map(|(a, b)| a * b).sum()
    }
}

/// Pairwise similarity over a set of rows.
///
/// ## Design Note
/// - `Send + Sync` so recommenders holding a measure can be shared
/// - implementations must return a symmetric matrix
pub trait SimilarityMeasure: Send + Sync {
    /// Returns the name of this measure (for logging/debugging)
    fn name(&self) -> &str;

    /// Similarity of every row with every other row
    fn pairwise<V: FeatureVector + Sync>(&self, rows: &[V]) -> SimilarityMatrix;
}
