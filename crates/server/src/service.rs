//! # Recommendation Service
//!
//! The request-facing layer over both recommenders:
//! 1. Startup: fit both models in parallel, reuse the fitted catalog for browsing
//! 2. Validate request parameters
//! 3. Dispatch to the catalog or the right recommender
//! 4. Wrap results in serializable responses
//!
//! The service is built once and shared by handle; every request method
//! takes `&self`, and the fitted models are never mutated afterwards.
//!
//! ## Startup failures
//! A recommender whose fit fails is logged and left unfitted. The service
//! still starts; `health()` reports the model as "not initialized" and its
//! requests fail with `ServiceError::DataUnavailable`.

use std::sync::Arc;
use std::time::Instant;

use data_loader::{DataSource, Movie, MovieCatalog, MovieId, UserId};
use recommenders::{CollaborativeRecommender, ContentRecommender, Recommender};
use tracing::{debug, error, info, instrument, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::types::*;

#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<MovieCatalog>,
    content: Arc<ContentRecommender>,
    collaborative: Arc<CollaborativeRecommender>,
}

impl RecommendationService {
    /// Build the service from configuration, reading the CSV data directory
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        info!("Loading data from {}", config.data_dir.display());
        let source: Arc<dyn DataSource> = Arc::new(config.data_source());
        Self::initialize(source, config.max_features).await
    }

    /// Fit both recommenders concurrently, then settle the listing catalog
    ///
    /// The listing reuses the content model's fitted catalog so browsing and
    /// recommendations see the same rows; the source is read again only when
    /// that model failed to fit.
    ///
    /// Only a panicking task is an error here; data and fit problems leave
    /// the affected part empty or unfitted.
    pub async fn initialize(source: Arc<dyn DataSource>, max_features: usize) -> Result<Self> {
        let start_time = Instant::now();

        let (content_result, collaborative_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let source = source.clone();
                move || {
                    let mut recommender =
                        ContentRecommender::new(source).with_max_features(max_features);
                    fit_or_log(&mut recommender);
                    recommender
                }
            }),
            tokio::task::spawn_blocking({
                let source = source.clone();
                move || {
                    let mut recommender = CollaborativeRecommender::new(source);
                    fit_or_log(&mut recommender);
                    recommender
                }
            })
        );

        let content = content_result.map_err(|e| join_error("content-based", e))?;
        let collaborative = collaborative_result.map_err(|e| join_error("collaborative", e))?;

        let catalog = match content.catalog() {
            Some(catalog) => catalog.clone(),
            None => tokio::task::spawn_blocking(move || load_catalog(source.as_ref()))
                .await
                .map_err(|e| join_error("catalog", e))?,
        };

        info!(
            "Service initialized in {:.2?}: catalog={} movies, content model={} movies, collaborative model={} users",
            start_time.elapsed(),
            catalog.len(),
            content.movie_count(),
            collaborative.user_count()
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            content: Arc::new(content),
            collaborative: Arc::new(collaborative),
        })
    }

    /// Browse the catalog, best rated first
    #[instrument(skip(self))]
    pub fn list_movies(&self, query: &MovieQuery) -> Result<MovieListResponse> {
        check_range("limit", query.limit, 1, MAX_MOVIE_LIMIT)?;
        if let Some(min_rating) = query.min_rating {
            if !(0.0..=10.0).contains(&min_rating) {
                return Err(ServiceError::InvalidParameter {
                    name: "min_rating",
                    reason: format!("{} is outside 0..=10", min_rating),
                });
            }
        }
        if self.catalog.is_empty() {
            return Err(ServiceError::DataUnavailable(
                "movie data not available".to_string(),
            ));
        }

        let movies: Vec<Movie> = self
            .catalog
            .filter(query.genre.as_deref(), query.min_rating, query.limit)
            .into_iter()
            .cloned()
            .collect();

        debug!("Listing {} movies", movies.len());
        Ok(MovieListResponse {
            count: movies.len(),
            movies,
            filters: MovieFilters {
                genre: query.genre.clone(),
                min_rating: query.min_rating,
            },
        })
    }

    pub fn get_movie(&self, movie_id: MovieId) -> Result<Movie> {
        self.catalog
            .get(movie_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("Movie with ID {} not found", movie_id)))
    }

    /// "More like this" for a seed movie
    #[instrument(skip(self))]
    pub fn content_recommendations(
        &self,
        movie_id: MovieId,
        limit: usize,
    ) -> Result<RecommendationResponse> {
        check_range("limit", limit, 1, MAX_RECOMMENDATION_LIMIT)?;

        let recommendations = self.content.recommend(movie_id, limit)?;
        if recommendations.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "Movie with ID {} not found or no recommendations available",
                movie_id
            )));
        }

        Ok(RecommendationResponse {
            method: Method::ContentBased,
            movie_id: Some(movie_id),
            user_id: None,
            count: recommendations.len(),
            recommendations,
        })
    }

    /// Personalized recommendations for a user (popular movies for new users)
    #[instrument(skip(self))]
    pub fn collaborative_recommendations(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<RecommendationResponse> {
        check_range("limit", limit, 1, MAX_RECOMMENDATION_LIMIT)?;

        let recommendations = self.collaborative.recommend(user_id, limit)?;
        if recommendations.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No recommendations available for user {}",
                user_id
            )));
        }

        Ok(RecommendationResponse {
            method: Method::CollaborativeFiltering,
            movie_id: None,
            user_id: Some(user_id),
            count: recommendations.len(),
            recommendations,
        })
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            api_version: API_VERSION,
            models: ModelStatus {
                content_based: ModelState::from_ready(self.content.is_ready()),
                collaborative: ModelState::from_ready(self.collaborative.is_ready()),
            },
        }
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }
}

fn load_catalog(source: &dyn DataSource) -> MovieCatalog {
    match source.load_movies() {
        Ok(movies) => MovieCatalog::from_movies(movies),
        Err(e) => {
            error!("Failed to load movie catalog: {}", e);
            MovieCatalog::new()
        }
    }
}

fn fit_or_log<R: Recommender>(recommender: &mut R) {
    let start_time = Instant::now();
    match recommender.fit() {
        Ok(()) => info!(
            "{} recommender ready in {:.2?}",
            recommender.name(),
            start_time.elapsed()
        ),
        Err(e) => error!("Failed to fit {} recommender: {}", recommender.name(), e),
    }
}

fn join_error(task: &str, err: tokio::task::JoinError) -> ServiceError {
    warn!("{} initialization task failed: {}", task, err);
    ServiceError::Internal(format!("{} initialization task failed: {}", task, err))
}

fn check_range(name: &'static str, value: usize, min: usize, max: usize) -> Result<()> {
    if value < min || value > max {
        return Err(ServiceError::InvalidParameter {
            name,
            reason: format!("{} is outside {}..={}", value, min, max),
        });
    }
    Ok(())
}
