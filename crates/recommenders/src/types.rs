//! Shared types for recommender output and the `Recommender` trait.

use crate::error::Result;
use data_loader::Movie;
use serde::Serialize;

/// A recommended movie with the score that ranked it.
///
/// Exactly one of the scores is present on the ranked paths: content
/// results carry `similarity_score`, warm collaborative results carry
/// `predicted_rating`. Cold-start results carry neither, which is how
/// callers tell the fallback apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_rating: Option<f32>,
}

impl Recommendation {
    pub fn similar(movie: Movie, score: f32) -> Self {
        Self {
            movie,
            similarity_score: Some(score),
            predicted_rating: None,
        }
    }

    pub fn predicted(movie: Movie, rating: f32) -> Self {
        Self {
            movie,
            similarity_score: None,
            predicted_rating: Some(rating),
        }
    }

    pub fn popular(movie: Movie) -> Self {
        Self {
            movie,
            similarity_score: None,
            predicted_rating: None,
        }
    }
}

/// Common lifecycle of both recommenders.
///
/// {Uninitialized} -> `fit()` -> {Ready}. `fit` is blocking and takes
/// `&mut self`; `recommend` is read-only and rejects calls with
/// `RecommendError::NotFitted` until a fit has succeeded.
pub trait Recommender: Send + Sync {
    /// Returns the name of this recommender (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Load data and rebuild every model structure
    fn fit(&mut self) -> Result<()>;

    fn is_ready(&self) -> bool;

    /// Up to `n` recommendations for `id` (a movie id or a user id)
    fn recommend(&self, id: u32, n: usize) -> Result<Vec<Recommendation>>;
}
