//! Data sources feeding the recommenders.
//!
//! `DataSource` is the loading seam: recommenders call `load_movies` /
//! `load_ratings` on every fit and never touch files themselves.
//!
//! Contract shared by every implementation: a source that does not exist
//! yields an empty vector plus a warning, not an error. Callers treat empty
//! as a distinguishable, recoverable condition.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::{Movie, Rating};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default catalog file name inside a data directory
pub const DEFAULT_MOVIES_FILE: &str = "movies.csv";

/// Default ratings file name inside a data directory
pub const DEFAULT_RATINGS_FILE: &str = "user_ratings.csv";

/// Anything that can produce the movie catalog and rating events.
///
/// `Send + Sync` so a single source can be shared by recommenders that are
/// fitted on different threads.
pub trait DataSource: Send + Sync {
    /// Load the movie catalog rows in source order
    fn load_movies(&self) -> Result<Vec<Movie>>;

    /// Load all rating events
    fn load_ratings(&self) -> Result<Vec<Rating>>;
}

/// Reads `movies.csv` and `user_ratings.csv` from a data directory.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    data_dir: PathBuf,
    movies_file: String,
    ratings_file: String,
}

impl CsvDataSource {
    /// Create a source rooted at `data_dir` using the default file names
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            movies_file: DEFAULT_MOVIES_FILE.to_string(),
            ratings_file: DEFAULT_RATINGS_FILE.to_string(),
        }
    }

    /// Override the catalog file name (default: movies.csv)
    pub fn with_movies_file(mut self, name: impl Into<String>) -> Self {
        self.movies_file = name.into();
        self
    }

    /// Override the ratings file name (default: user_ratings.csv)
    pub fn with_ratings_file(mut self, name: impl Into<String>) -> Self {
        self.ratings_file = name.into();
        self
    }

    pub fn movies_path(&self) -> PathBuf {
        self.data_dir.join(&self.movies_file)
    }

    pub fn ratings_path(&self) -> PathBuf {
        self.data_dir.join(&self.ratings_file)
    }
}

/// Open `path` for parsing, or `None` when it does not exist.
fn open_if_present(path: &Path) -> Result<Option<BufReader<File>>> {
    if !path.exists() {
        warn!("Data source not found at {}, treating as empty", path.display());
        return Ok(None);
    }
    if !path.is_file() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(Some(BufReader::new(File::open(path)?)))
}

impl DataSource for CsvDataSource {
    fn load_movies(&self) -> Result<Vec<Movie>> {
        let path = self.movies_path();
        let Some(reader) = open_if_present(&path)? else {
            return Ok(Vec::new());
        };
        let movies = parser::parse_movies(reader, &self.movies_file)?;
        info!("Loaded {} movies from {}", movies.len(), path.display());
        Ok(movies)
    }

    fn load_ratings(&self) -> Result<Vec<Rating>> {
        let path = self.ratings_path();
        let Some(reader) = open_if_present(&path)? else {
            return Ok(Vec::new());
        };
        let ratings = parser::parse_ratings(reader, &self.ratings_file)?;
        info!("Loaded {} ratings from {}", ratings.len(), path.display());
        Ok(ratings)
    }
}

/// Source backed by vectors already in memory (fixtures, embedding).
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    movies: Vec<Movie>,
    ratings: Vec<Rating>,
}

impl InMemoryDataSource {
    pub fn new(movies: Vec<Movie>, ratings: Vec<Rating>) -> Self {
        Self { movies, ratings }
    }
}

impl DataSource for InMemoryDataSource {
    fn load_movies(&self) -> Result<Vec<Movie>> {
        Ok(self.movies.clone())
    }

    fn load_ratings(&self) -> Result<Vec<Rating>> {
        Ok(self.ratings.clone())
    }
}
