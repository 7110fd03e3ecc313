//! Server crate for the movie recommendation service.
//!
//! This crate contains the `RecommendationService` that owns the catalog
//! and both fitted recommenders, plus its configuration and error types.
//! An HTTP layer (or the CLI) calls the service; routing is not part of
//! this crate.

pub mod config;
pub mod error;
pub mod types;
pub mod service;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use service::RecommendationService;
pub use types::{
    HealthReport, Method, ModelState, ModelStatus, MovieFilters, MovieListResponse, MovieQuery,
    RecommendationResponse, API_VERSION, DEFAULT_MOVIE_LIMIT, DEFAULT_RECOMMENDATION_LIMIT,
};
