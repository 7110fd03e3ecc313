//! Service configuration.
//!
//! Values come from `MOVIE_RECS_*` environment variables (after an optional
//! `.env` file); anything unset falls back to the defaults below.
//!
//! | Variable                   | Default            |
//! |----------------------------|--------------------|
//! | `MOVIE_RECS_DATA_DIR`      | `data`             |
//! | `MOVIE_RECS_MOVIES_FILE`   | `movies.csv`       |
//! | `MOVIE_RECS_RATINGS_FILE`  | `user_ratings.csv` |
//! | `MOVIE_RECS_MAX_FEATURES`  | `500`              |

use data_loader::source::{DEFAULT_MOVIES_FILE, DEFAULT_RATINGS_FILE};
use data_loader::CsvDataSource;
use recommenders::DEFAULT_MAX_FEATURES;
use serde::Deserialize;
use std::path::PathBuf;

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "MOVIE_RECS_";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceConfig {
    /// Directory holding the CSV files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_movies_file")]
    pub movies_file: String,

    #[serde(default = "default_ratings_file")]
    pub ratings_file: String,

    /// TF-IDF vocabulary cap for the content model
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_movies_file() -> String {
    DEFAULT_MOVIES_FILE.to_string()
}

fn default_ratings_file() -> String {
    DEFAULT_RATINGS_FILE.to_string()
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            movies_file: default_movies_file(),
            ratings_file: default_ratings_file(),
            max_features: default_max_features(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env::<ServiceConfig>()
    }

    /// Load configuration from explicit `(name, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }

    /// CSV source described by this configuration
    pub fn data_source(&self) -> CsvDataSource {
        CsvDataSource::new(&self.data_dir)
            .with_movies_file(&self.movies_file)
            .with_ratings_file(&self.ratings_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.max_features, 500);
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = ServiceConfig::from_vars(vars(&[
            ("MOVIE_RECS_DATA_DIR", "/srv/movies"),
            ("MOVIE_RECS_MAX_FEATURES", "64"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/movies"));
        assert_eq!(config.max_features, 64);
        assert_eq!(config.movies_file, "movies.csv");
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = ServiceConfig::from_vars(vars(&[("MOVIE_RECS_MAX_FEATURES", "lots")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_data_source_paths() {
        let config = ServiceConfig {
            ratings_file: "ratings.csv".to_string(),
            ..ServiceConfig::default()
        };
        let source = config.data_source();
        assert_eq!(source.movies_path(), PathBuf::from("data/movies.csv"));
        assert_eq!(source.ratings_path(), PathBuf::from("data/ratings.csv"));
    }
}
