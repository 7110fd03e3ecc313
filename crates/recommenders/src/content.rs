//! Content-Based Recommender
//!
//! "Movies like this one": ranks catalog movies by the cosine similarity of
//! their genre/director/cast TF-IDF vectors to a seed movie.
//!
//! ## Algorithm
//! fit:
//! 1. Load the catalog (empty -> `DataUnavailable`)
//! 2. Build one TF-IDF row per movie
//! 3. Compute the movie x movie similarity matrix
//!
//! recommend(movie_id, n):
//! 1. Unknown movie -> empty result
//! 2. Pair the seed's similarity row with catalog positions
//! 3. Stable sort by score DESC (ties keep catalog order)
//! 4. Drop the seed itself, take `n`

use crate::error::{RecommendError, Result};
use crate::types::{Recommendation, Recommender};
use data_loader::{DataSource, MovieCatalog, MovieId};
use features::{build_content_features, ContentFeatures, DEFAULT_MAX_FEATURES};
use similarity::{CosineSimilarity, SimilarityMatrix, SimilarityMeasure};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Everything a fit produces, installed as one value.
#[derive(Debug)]
struct ContentModel {
    catalog: MovieCatalog,
    features: ContentFeatures,
    similarity: SimilarityMatrix,
}

pub struct ContentRecommender<S: SimilarityMeasure = CosineSimilarity> {
    /// Shared data source (read on every fit)
    source: Arc<dyn DataSource>,

    /// Pairwise measure used to build the movie x movie matrix
    measure: S,

    /// TF-IDF vocabulary cap
    max_features: usize,

    /// `None` until the first successful fit
    model: Option<ContentModel>,
}

impl ContentRecommender<CosineSimilarity> {
    /// Create an unfitted recommender using cosine similarity
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_measure(source, CosineSimilarity)
    }
}

impl<S: SimilarityMeasure> ContentRecommender<S> {
    pub fn with_measure(source: Arc<dyn DataSource>, measure: S) -> Self {
        Self {
            source,
            measure,
            max_features: DEFAULT_MAX_FEATURES,
            model: None,
        }
    }

    /// Configure the TF-IDF vocabulary cap (default: 500)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Number of movies in the fitted catalog (0 when unfitted)
    pub fn movie_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.catalog.len())
    }

    /// Fitted catalog, if any
    pub fn catalog(&self) -> Option<&MovieCatalog> {
        self.model.as_ref().map(|m| &m.catalog)
    }

    /// Fitted movie x movie similarity matrix, if any
    pub fn similarity_matrix(&self) -> Option<&SimilarityMatrix> {
        self.model.as_ref().map(|m| &m.similarity)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.features.vocabulary_size())
    }

    fn model(&self) -> Result<&ContentModel> {
        self.model
            .as_ref()
            .ok_or(RecommendError::NotFitted("content-based"))
    }
}

impl<S: SimilarityMeasure> Recommender for ContentRecommender<S> {
    fn name(&self) -> &'static str {
        "content-based"
    }

    #[instrument(skip(self))]
    fn fit(&mut self) -> Result<()> {
        let catalog = MovieCatalog::from_movies(self.source.load_movies()?);
        if catalog.is_empty() {
            return Err(RecommendError::DataUnavailable(
                "movie catalog is empty".to_string(),
            ));
        }

        let features = build_content_features(&catalog, self.max_features)?;
        let similarity = self.measure.pairwise(&features.rows);

        info!(
            "Content-based model trained on {} movies ({} terms, {} similarity)",
            catalog.len(),
            features.vocabulary_size(),
            self.measure.name()
        );

        // Swap in the whole model at once
        self.model = Some(ContentModel {
            catalog,
            features,
            similarity,
        });
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    #[instrument(skip(self))]
    fn recommend(&self, movie_id: MovieId, n: usize) -> Result<Vec<Recommendation>> {
        let model = self.model()?;

        let Some(seed) = model.catalog.position(movie_id) else {
            debug!("Movie {} not in catalog", movie_id);
            return Ok(Vec::new());
        };

        let mut scored: Vec<(usize, f32)> = model
            .similarity
            .row(seed)
            .iter()
            .copied()
            .enumerate()
            .collect();

        // Stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let recommendations: Vec<Recommendation> = scored
            .into_iter()
            .filter(|&(pos, _)| pos != seed)
            .take(n)
            .filter_map(|(pos, score)| {
                let movie = model.catalog.at(pos)?;
                Some(Recommendation::similar(movie.clone(), score))
            })
            .collect();

        debug!(
            "Generated {} content-based recommendations for movie {}",
            recommendations.len(),
            movie_id
        );
        Ok(recommendations)
    }
}
