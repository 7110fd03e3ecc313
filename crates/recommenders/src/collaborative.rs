//! Collaborative Filtering Recommender
//!
//! "Users who rate like you rated these highly": predicts ratings for the
//! movies a user has not rated from the ratings of similar users.
//!
//! ## Algorithm
//! fit:
//! 1. Load catalog and ratings (no ratings -> `DataUnavailable`)
//! 2. Pivot ratings into the user x movie matrix
//! 3. Mean-center each user's ratings
//! 4. Compute user x user similarity on the centered rows
//!
//! recommend(user_id, n):
//! - Cold start (user not in the matrix): top `n` catalog movies by rating
//! - Otherwise, for every movie the user has not rated:
//!   predicted = sum(sim(u, o) * rating(o, m)) / sum(|sim(u, o)|)
//!   over the other users `o` who rated it, using their raw ratings.
//!   Movies nobody rated, or whose weight sum is 0, are skipped.
//! - Sort by prediction DESC, take `n`, drop movies missing from the catalog

use crate::error::{RecommendError, Result};
use crate::types::{Recommendation, Recommender};
use data_loader::{DataSource, MovieCatalog, MovieId, UserId};
use features::UserItemMatrix;
use similarity::{CosineSimilarity, SimilarityMatrix, SimilarityMeasure};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Debug)]
struct CollaborativeModel {
    catalog: MovieCatalog,
    matrix: UserItemMatrix,
    user_means: Vec<f32>,
    similarity: SimilarityMatrix,
}

pub struct CollaborativeRecommender<S: SimilarityMeasure = CosineSimilarity> {
    /// Shared data source (read on every fit)
    source: Arc<dyn DataSource>,

    /// Pairwise measure used to build the user x user matrix
    measure: S,

    /// `None` until the first successful fit
    model: Option<CollaborativeModel>,
}

impl CollaborativeRecommender<CosineSimilarity> {
    /// Create an unfitted recommender using cosine similarity
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_measure(source, CosineSimilarity)
    }
}

impl<S: SimilarityMeasure> CollaborativeRecommender<S> {
    pub fn with_measure(source: Arc<dyn DataSource>, measure: S) -> Self {
        Self {
            source,
            measure,
            model: None,
        }
    }

    /// Number of users in the fitted matrix (0 when unfitted)
    pub fn user_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.matrix.user_count())
    }

    /// Number of catalog movies known to the fitted model
    pub fn movie_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.catalog.len())
    }

    /// Fitted user x user similarity matrix, if any
    pub fn similarity_matrix(&self) -> Option<&SimilarityMatrix> {
        self.model.as_ref().map(|m| &m.similarity)
    }

    /// Mean rating of a known user
    pub fn user_mean(&self, user_id: UserId) -> Option<f32> {
        let model = self.model.as_ref()?;
        let row = model.matrix.user_row(user_id)?;
        model.user_means.get(row).copied()
    }

    fn model(&self) -> Result<&CollaborativeModel> {
        self.model
            .as_ref()
            .ok_or(RecommendError::NotFitted("collaborative"))
    }
}

impl CollaborativeModel {
    /// Popular-movie fallback for users without history
    fn cold_start(&self, n: usize) -> Vec<Recommendation> {
        self.catalog
            .top_rated(n)
            .into_iter()
            .map(|movie| Recommendation::popular(movie.clone()))
            .collect()
    }

    /// Predicted ratings for every unrated movie, in matrix column order
    fn predict_unrated(&self, user_row: usize) -> Vec<(MovieId, f32)> {
        let similarities = self.similarity.row(user_row);
        let user_cells = self.matrix.row(user_row);

        user_cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .filter_map(|(col, _)| {
                let mut weighted_sum = 0.0f32;
                let mut similarity_sum = 0.0f32;
                let mut raters = 0usize;

                for other in 0..self.matrix.user_count() {
                    if other == user_row {
                        continue;
                    }
                    if let Some(rating) = self.matrix.cell(other, col) {
                        let sim = similarities[other];
                        weighted_sum += sim * rating;
                        similarity_sum += sim.abs();
                        raters += 1;
                    }
                }

                // Nobody rated it, or every contributing similarity is 0
                if raters == 0 || similarity_sum == 0.0 {
                    return None;
                }
                Some((self.matrix.movie_ids()[col], weighted_sum / similarity_sum))
            })
            .collect()
    }
}

impl<S: SimilarityMeasure> Recommender for CollaborativeRecommender<S> {
    fn name(&self) -> &'static str {
        "collaborative"
    }

    #[instrument(skip(self))]
    fn fit(&mut self) -> Result<()> {
        let catalog = MovieCatalog::from_movies(self.source.load_movies()?);
        let ratings = self.source.load_ratings()?;
        if ratings.is_empty() {
            return Err(RecommendError::DataUnavailable(
                "ratings data is empty".to_string(),
            ));
        }

        let matrix = UserItemMatrix::from_ratings(&ratings);
        let normalized = matrix.normalize();
        let similarity = self.measure.pairwise(&normalized.rows);

        info!(
            "Collaborative filtering model trained on {} users x {} movies ({} similarity)",
            matrix.user_count(),
            matrix.movie_count(),
            self.measure.name()
        );

        // Swap in the whole model at once
        self.model = Some(CollaborativeModel {
            catalog,
            matrix,
            user_means: normalized.user_means,
            similarity,
        });
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    #[instrument(skip(self))]
    fn recommend(&self, user_id: UserId, n: usize) -> Result<Vec<Recommendation>> {
        let model = self.model()?;

        let Some(user_row) = model.matrix.user_row(user_id) else {
            debug!("User {} has no ratings, using popular movies", user_id);
            return Ok(model.cold_start(n));
        };

        let mut predictions = model.predict_unrated(user_row);
        debug!(
            "Predicted {} unrated movies for user {}",
            predictions.len(),
            user_id
        );

        // Stable: equal predictions keep ascending movie id order
        predictions.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        predictions.truncate(n);

        let recommendations: Vec<Recommendation> = predictions
            .into_iter()
            .filter_map(|(movie_id, predicted)| {
                let movie = model.catalog.get(movie_id)?;
                Some(Recommendation::predicted(movie.clone(), predicted))
            })
            .collect();

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{InMemoryDataSource, Movie, Rating};

    fn movie(id: MovieId, rating: f32) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            genres: vec!["Drama".to_string()],
            director: "Someone".to_string(),
            cast: vec![],
            rating,
            year: 2000,
            description: String::new(),
        }
    }

    fn rating(user_id: UserId, movie_id: MovieId, rating: f32) -> Rating {
        Rating { user_id, movie_id, rating }
    }

    fn create_test_source() -> Arc<dyn DataSource> {
        Arc::new(InMemoryDataSource::new(
            vec![movie(1, 8.0), movie(2, 9.5), movie(3, 7.0), movie(4, 9.5)],
            vec![
                rating(1, 1, 5.0),
                rating(1, 2, 3.0),
                rating(2, 1, 4.0),
                rating(2, 3, 5.0),
            ],
        ))
    }

    fn fitted() -> CollaborativeRecommender {
        let mut recommender = CollaborativeRecommender::new(create_test_source());
        recommender.fit().unwrap();
        recommender
    }

    #[test]
    fn test_unfitted_rejects_requests() {
        let recommender = CollaborativeRecommender::new(create_test_source());
        assert!(matches!(
            recommender.recommend(1, 5),
            Err(RecommendError::NotFitted(_))
        ));
    }

    #[test]
    fn test_fit_without_ratings_fails() {
        let source: Arc<dyn DataSource> =
            Arc::new(InMemoryDataSource::new(vec![movie(1, 8.0)], vec![]));
        let mut recommender = CollaborativeRecommender::new(source);
        assert!(matches!(
            recommender.fit(),
            Err(RecommendError::DataUnavailable(_))
        ));
        assert!(!recommender.is_ready());
    }

    #[test]
    fn test_cold_start_returns_top_rated_without_prediction() {
        let recommender = fitted();
        let recs = recommender.recommend(42, 3).unwrap();

        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
        assert!(recs.iter().all(|r| r.predicted_rating.is_none()));
        assert!(recs.iter().all(|r| r.similarity_score.is_none()));
    }

    #[test]
    fn test_warm_path_considers_unrated_movie_only() {
        let recommender = fitted();
        let recs = recommender.recommend(1, 1).unwrap();

        // User 1 rated 1 and 2; only movie 3 is unrated and rated by user 2.
        // Centered rows: u1 = [1, -1, 0], u2 = [-0.5, 0, 0.5] -> sim < 0,
        // so the prediction is -sim*5 / |sim| = -5.
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].movie.id, 3);
        assert!((recs[0].predicted_rating.unwrap() + 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_never_recommends_rated_movies() {
        let recommender = fitted();
        for user in [1, 2] {
            let recs = recommender.recommend(user, 10).unwrap();
            for rec in recs {
                let id = rec.movie.id;
                let rated = match user {
                    1 => [1, 2].contains(&id),
                    _ => [1, 3].contains(&id),
                };
                assert!(!rated, "user {user} already rated movie {id}");
            }
        }
    }

    #[test]
    fn test_equal_predictions_keep_ascending_movie_id_order() {
        // User 2 rates 10 and 7 identically; user 1 has seen neither
        let source: Arc<dyn DataSource> = Arc::new(InMemoryDataSource::new(
            vec![movie(10, 6.0), movie(1, 8.0), movie(7, 6.0), movie(2, 7.0)],
            vec![
                rating(1, 1, 5.0),
                rating(1, 2, 3.0),
                rating(2, 10, 5.0),
                rating(2, 1, 4.0),
                rating(2, 2, 2.0),
                rating(2, 7, 5.0),
            ],
        ));
        let mut recommender = CollaborativeRecommender::new(source);
        recommender.fit().unwrap();

        let recs = recommender.recommend(1, 5).unwrap();
        let ids: Vec<MovieId> = recs.iter().map(|r| r.movie.id).collect();
        assert_eq!(ids, vec![7, 10]);
        assert_eq!(recs[0].predicted_rating, recs[1].predicted_rating);
        assert!((recs[0].predicted_rating.unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_similarity_movies_are_skipped() {
        // Users 1 and 2 share no rated movies -> similarity 0
        let source: Arc<dyn DataSource> = Arc::new(InMemoryDataSource::new(
            vec![movie(1, 8.0), movie(2, 7.0), movie(3, 6.0), movie(4, 5.0)],
            vec![
                rating(1, 1, 5.0),
                rating(1, 2, 3.0),
                rating(2, 3, 4.0),
                rating(2, 4, 2.0),
            ],
        ));
        let mut recommender = CollaborativeRecommender::new(source);
        recommender.fit().unwrap();

        assert_eq!(recommender.similarity_matrix().unwrap().get(0, 1), 0.0);
        assert!(recommender.recommend(1, 5).unwrap().is_empty());
    }

    #[test]
    fn test_movies_missing_from_catalog_are_dropped() {
        let source: Arc<dyn DataSource> = Arc::new(InMemoryDataSource::new(
            vec![movie(1, 8.0)],
            vec![
                rating(1, 1, 5.0),
                rating(1, 2, 1.0),
                rating(2, 1, 4.0),
                rating(2, 2, 2.0),
                rating(2, 99, 5.0),
            ],
        ));
        let mut recommender = CollaborativeRecommender::new(source);
        recommender.fit().unwrap();

        assert!(recommender.recommend(1, 5).unwrap().is_empty());
    }

    #[test]
    fn test_user_mean() {
        let recommender = fitted();
        assert_eq!(recommender.user_mean(1), Some(4.0));
        assert_eq!(recommender.user_mean(7), None);
        assert_eq!(recommender.user_count(), 2);
    }
}
