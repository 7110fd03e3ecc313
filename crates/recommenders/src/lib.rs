//! # Recommenders Crate
//!
//! The two recommendation engines of the service.
//!
//! ## Components
//!
//! ### Content-Based (`ContentRecommender`)
//! "More like this movie":
//! - TF-IDF over genres, director and cast
//! - Cosine similarity between every pair of catalog movies
//!
//! ### Collaborative Filtering (`CollaborativeRecommender`)
//! "Users who rate like you also liked...":
//! - User x movie matrix, mean-centered per user
//! - Cosine similarity between users
//! - Similarity-weighted rating prediction for unrated movies
//! - Falls back to the catalog's top-rated movies for unknown users
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CsvDataSource;
//! use recommenders::{CollaborativeRecommender, ContentRecommender, Recommender};
//! use std::sync::Arc;
//!
//! let source = Arc::new(CsvDataSource::new("data"));
//!
//! let mut content = ContentRecommender::new(source.clone());
//! content.fit()?;
//! let similar = content.recommend(movie_id, 10)?;
//!
//! let mut collaborative = CollaborativeRecommender::new(source);
//! collaborative.fit()?;
//! let for_user = collaborative.recommend(user_id, 10)?;
//! ```
//!
//! ## Performance Notes
//!
//! Both fits are O(N^2) in time and memory (N = movies or users). The
//! matrices are built with rayon; `recommend` is a single row scan.

pub mod error;
pub mod types;
pub mod content;
pub mod collaborative;

pub use error::{RecommendError, Result};
pub use types::{Recommendation, Recommender};
pub use content::ContentRecommender;
pub use collaborative::CollaborativeRecommender;
pub use features::DEFAULT_MAX_FEATURES;
