//! Similarity engine.
//!
//! Computes pairwise similarity matrices: movie x movie over content
//! features and user x user over mean-centered ratings.
//!
//! ```ignore
//! use similarity::{CosineSimilarity, SimilarityMeasure};
//!
//! let matrix = CosineSimilarity.pairwise(&content.rows);
//! let score = matrix.get(0, 1);
//! ```

pub mod traits;
pub mod matrix;
pub mod cosine;

pub use traits::{FeatureVector, SimilarityMeasure};
pub use matrix::SimilarityMatrix;
pub use cosine::{cosine, cosine_similarity, CosineSimilarity};
