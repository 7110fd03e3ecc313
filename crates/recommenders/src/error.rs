//! Error types for the recommenders.

use data_loader::DataLoadError;
use features::FeatureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// Source missing or empty at fit time; the recommender stays unfitted
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// `recommend` called before a successful `fit`
    #[error("{0} recommender has not been fitted")]
    NotFitted(&'static str),

    #[error("Failed to load data: {0}")]
    Load(#[from] DataLoadError),

    #[error("Failed to build features: {0}")]
    Features(#[from] FeatureError),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
