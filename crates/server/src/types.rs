//! Request and response types of the service.

use data_loader::{Movie, MovieId, UserId};
use recommenders::Recommendation;
use serde::Serialize;

pub const API_VERSION: &str = "1.0.0";

/// Default and maximum page size for `list_movies`
pub const DEFAULT_MOVIE_LIMIT: usize = 30;
pub const MAX_MOVIE_LIMIT: usize = 100;

/// Default and maximum count for both recommendation methods
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;
pub const MAX_RECOMMENDATION_LIMIT: usize = 50;

/// Catalog browsing parameters
#[derive(Debug, Clone, PartialEq)]
pub struct MovieQuery {
    /// 1..=100
    pub limit: usize,
    /// Case-insensitive substring of the genre list
    pub genre: Option<String>,
    /// 0..=10
    pub min_rating: Option<f32>,
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_MOVIE_LIMIT,
            genre: None,
            min_rating: None,
        }
    }
}

impl MovieQuery {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }
}

/// Filters echoed back in a movie listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieFilters {
    pub genre: Option<String>,
    pub min_rating: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieListResponse {
    pub count: usize,
    pub movies: Vec<Movie>,
    pub filters: MovieFilters,
}

/// Which algorithm produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Method {
    #[serde(rename = "content-based")]
    ContentBased,
    #[serde(rename = "collaborative-filtering")]
    CollaborativeFiltering,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    pub method: Method,
    /// Seed movie (content-based only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<MovieId>,
    /// Target user (collaborative only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub count: usize,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelState {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "not initialized")]
    NotInitialized,
}

impl ModelState {
    pub fn from_ready(ready: bool) -> Self {
        if ready {
            ModelState::Ready
        } else {
            ModelState::NotInitialized
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelStatus {
    pub content_based: ModelState,
    pub collaborative: ModelState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub api_version: &'static str,
    pub models: ModelStatus,
}
