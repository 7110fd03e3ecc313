//! Content features: one TF-IDF row per catalog movie.
//!
//! Each movie is described by a text blob made of its genre tags, director
//! and cast members. Row `i` of the output belongs to catalog position `i`.

use crate::error::Result;
use crate::tfidf::{SparseVector, TfidfVectorizer};
use data_loader::{Movie, MovieCatalog};
use tracing::{debug, instrument};

/// TF-IDF rows for a catalog plus the fitted vectorizer.
#[derive(Debug, Clone)]
pub struct ContentFeatures {
    pub vectorizer: TfidfVectorizer,
    pub rows: Vec<SparseVector>,
}

impl ContentFeatures {
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}

/// Space-joined genres, director and cast of a movie.
///
/// Delimiters inside multi-valued fields become spaces, so
/// `Action|Sci-Fi` contributes the same tokens as `Action Sci-Fi`.
pub fn content_blob(movie: &Movie) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(movie.genres.len() + movie.cast.len() + 1);
    parts.extend(movie.genres.iter().map(String::as_str));
    parts.push(movie.director.as_str());
    parts.extend(movie.cast.iter().map(String::as_str));

    parts
        .into_iter()
        .map(|part| part.replace('|', " "))
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build TF-IDF content features for every movie in catalog order.
#[instrument(skip(catalog), fields(movies = catalog.len()))]
pub fn build_content_features(catalog: &MovieCatalog, max_features: usize) -> Result<ContentFeatures> {
    let blobs: Vec<String> = catalog.iter().map(content_blob).collect();

    let mut vectorizer = TfidfVectorizer::new().with_max_features(max_features);
    let rows = vectorizer.fit_transform(&blobs)?;

    debug!(
        "Built content features: {} rows x {} terms",
        rows.len(),
        vectorizer.vocabulary_size()
    );
    Ok(ContentFeatures { vectorizer, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, genres: &[&str], director: &str, cast: &[&str]) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            director: director.to_string(),
            cast: cast.iter().map(|s| s.to_string()).collect(),
            rating: 7.0,
            year: 2000,
            description: "Ignored by content features".to_string(),
        }
    }

    #[test]
    fn test_content_blob() {
        let m = movie(1, &["Action", "Sci-Fi"], "Lana Wachowski", &["Keanu Reeves", "Hugo Weaving"]);
        assert_eq!(
            content_blob(&m),
            "Action Sci-Fi Lana Wachowski Keanu Reeves Hugo Weaving"
        );
    }

    #[test]
    fn test_content_blob_skips_empty_fields() {
        let m = movie(1, &["Drama"], "", &[]);
        assert_eq!(content_blob(&m), "Drama");
    }

    #[test]
    fn test_build_content_features_row_per_movie() {
        let catalog = MovieCatalog::from_movies(vec![
            movie(1, &["Action", "Sci-Fi"], "A", &[]),
            movie(2, &["Action"], "B", &[]),
            movie(3, &["Drama"], "C", &[]),
        ]);

        let features = build_content_features(&catalog, 500).unwrap();
        assert_eq!(features.rows.len(), 3);
        // action, sci, fi, drama (single-letter directors are not tokens)
        assert_eq!(features.vocabulary_size(), 4);
    }

    #[test]
    fn test_vocabulary_cap_applies() {
        let catalog = MovieCatalog::from_movies(vec![
            movie(1, &["Action", "Thriller"], "Nolan", &["Bale"]),
            movie(2, &["Action"], "Mann", &["Pacino"]),
        ]);

        let features = build_content_features(&catalog, 1).unwrap();
        assert_eq!(features.vocabulary_size(), 1);
        assert!(features.vectorizer.vocabulary().contains_key("action"));
    }
}
