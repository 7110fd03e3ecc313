//! MovieCatalog building and querying.
//!
//! This module builds the catalog from loaded rows and answers the
//! catalog-level queries:
//! - `from_movies`: ordered insert, first occurrence of an id wins
//! - `top_rated`: best catalog ratings (cold-start fallback)
//! - `filter`: genre / minimum rating / limit browsing

use crate::types::*;
use std::cmp::Ordering;
use tracing::{debug, warn};

impl MovieCatalog {
    /// Build a catalog from loaded rows, preserving their order.
    ///
    /// Duplicate ids are skipped with a warning so `id` stays unique.
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut catalog = MovieCatalog::new();
        let mut duplicates = 0usize;

        for movie in movies {
            let id = movie.id;
            if !catalog.insert(movie) {
                debug!("Skipping duplicate catalog row for movie {}", id);
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            warn!(
                "Catalog contained {} duplicate movie ids, kept first occurrence",
                duplicates
            );
        }
        catalog
    }

    /// Top `n` movies by catalog rating, highest first.
    ///
    /// Stable sort: equal ratings keep catalog order.
    pub fn top_rated(&self, n: usize) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.movies.iter().collect();
        sort_by_rating_desc(&mut movies);
        movies.truncate(n);
        movies
    }

    /// Browse the catalog.
    ///
    /// ## Algorithm
    /// 1. Keep movies whose `|`-joined genres contain `genre` (case-insensitive)
    /// 2. Keep movies with `rating >= min_rating`
    /// 3. Sort by rating DESC (stable)
    /// 4. Truncate to `limit`
    pub fn filter(&self, genre: Option<&str>, min_rating: Option<f32>, limit: usize) -> Vec<&Movie> {
        let genre = genre.map(str::to_lowercase);

        let mut movies: Vec<&Movie> = self
            .movies
            .iter()
            .filter(|movie| match &genre {
                Some(g) => movie.genres_joined().to_lowercase().contains(g.as_str()),
                None => true,
            })
            .filter(|movie| min_rating.is_none_or(|min| movie.rating >= min))
            .collect();

        sort_by_rating_desc(&mut movies);
        movies.truncate(limit);
        movies
    }
}

fn sort_by_rating_desc(movies: &mut [&Movie]) {
    movies.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, genres: &[&str], rating: f32) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            director: "Someone".to_string(),
            cast: vec![],
            rating,
            year: 2000,
            description: String::new(),
        }
    }

    fn create_test_catalog() -> MovieCatalog {
        MovieCatalog::from_movies(vec![
            movie(1, &["Action", "Sci-Fi"], 7.5),
            movie(2, &["Drama"], 9.0),
            movie(3, &["Action"], 7.5),
            movie(4, &["Romance", "Drama"], 6.0),
        ])
    }

    #[test]
    fn test_from_movies_keeps_first_duplicate() {
        let catalog = MovieCatalog::from_movies(vec![
            movie(1, &["Action"], 5.0),
            movie(1, &["Drama"], 9.0),
            movie(2, &["Drama"], 6.0),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().genres, vec!["Action"]);
        assert_eq!(catalog.position(2), Some(1));
    }

    #[test]
    fn test_top_rated_breaks_ties_by_catalog_order() {
        let catalog = create_test_catalog();
        let ids: Vec<MovieId> = catalog.top_rated(3).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_filter_by_genre_case_insensitive() {
        let catalog = create_test_catalog();
        let ids: Vec<MovieId> = catalog
            .filter(Some("drAMA"), None, 10)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_filter_substring_matches_inside_tags() {
        let catalog = create_test_catalog();
        let ids: Vec<MovieId> = catalog
            .filter(Some("sci"), None, 10)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_filter_min_rating_and_limit() {
        let catalog = create_test_catalog();
        let ids: Vec<MovieId> = catalog
            .filter(None, Some(7.5), 2)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
