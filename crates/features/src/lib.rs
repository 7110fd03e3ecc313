//! Feature construction for the recommenders.
//!
//! This crate provides:
//! - `TfidfVectorizer` and `SparseVector` for text features
//! - `build_content_features` turning a catalog into one TF-IDF row per movie
//! - `UserItemMatrix` pivoting rating events, with per-user mean centering
//!
//! ## Example Usage
//! ```ignore
//! use features::{build_content_features, UserItemMatrix};
//!
//! let content = build_content_features(&catalog, 500)?;
//! let matrix = UserItemMatrix::from_ratings(&ratings);
//! let normalized = matrix.normalize();
//! ```

pub mod error;
pub mod stopwords;
pub mod tfidf;
pub mod content;
pub mod user_item;

// Re-export main types
pub use error::{FeatureError, Result};
pub use tfidf::{SparseVector, TfidfVectorizer, DEFAULT_MAX_FEATURES};
pub use content::{build_content_features, content_blob, ContentFeatures};
pub use user_item::{NormalizedRatings, UserItemMatrix};
