//! Core domain types for the movie catalog and rating events.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - `Movie` and `Rating` records as loaded from the tabular sources
//! - `MovieCatalog`, the ordered in-memory movie table every recommender owns

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the catalog.
///
/// Immutable once loaded; `id` is unique across a `MovieCatalog`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movie_id")]
    pub id: MovieId,
    pub title: String,
    /// Genre tags in source order (serialized `|`-separated in the CSV)
    pub genres: Vec<String>,
    pub director: String,
    /// Cast members in billing order (serialized `|`-separated in the CSV)
    pub cast: Vec<String>,
    /// Catalog rating on a 0-10 scale
    pub rating: f32,
    pub year: u16,
    pub description: String,
}

impl Movie {
    /// Genre tags joined back into their `|`-separated source form.
    pub fn genres_joined(&self) -> String {
        self.genres.join("|")
    }
}

// =============================================================================
// Rating Type
// =============================================================================

/// A single rating event from a user for a movie.
///
/// `movie_id` is expected to reference the catalog but nothing enforces it;
/// the collaborative layer drops unknown movies at result time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
}

// =============================================================================
// MovieCatalog - ordered movie table
// =============================================================================

/// Ordered movie table with O(1) id lookups.
///
/// Catalog order is the order movies were inserted (i.e. source row order)
/// and is the tie-break order everywhere results are ranked. Row `i` of any
/// per-movie feature or similarity matrix corresponds to `movies[i]`.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    pub(crate) movies: Vec<Movie>,
    pub(crate) positions: HashMap<MovieId, usize>,
}

impl MovieCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by ID
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.positions.get(&id).map(|&pos| &self.movies[pos])
    }

    /// Catalog position (matrix row) of a movie
    pub fn position(&self, id: MovieId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Movie at a catalog position
    pub fn at(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Insert a movie at the end of the catalog.
    ///
    /// Returns `false` (and leaves the catalog untouched) when the id is
    /// already present: the first occurrence wins.
    pub fn insert(&mut self, movie: Movie) -> bool {
        if self.positions.contains_key(&movie.id) {
            return false;
        }
        self.positions.insert(movie.id, self.movies.len());
        self.movies.push(movie);
        true
    }
}
