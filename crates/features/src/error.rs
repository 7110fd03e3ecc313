//! Error types for feature construction.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// No documents were supplied to the vectorizer
    #[error("Cannot build features from an empty corpus")]
    EmptyCorpus,

    /// Every document was empty or consisted only of stop words
    #[error("Empty vocabulary: documents contain no usable terms")]
    EmptyVocabulary,

    /// A vocabulary cap of 0 would keep no terms at all
    #[error("max_features must be at least 1, got {0}")]
    InvalidMaxFeatures(usize),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
