//! # Data Loader Crate
//!
//! This crate loads the movie catalog and rating events into memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, MovieCatalog)
//! - **parser**: Parse the CSV sources into Rust structs
//! - **source**: The `DataSource` loading seam (CSV and in-memory)
//! - **index**: Catalog building and browsing queries
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{CsvDataSource, DataSource, MovieCatalog};
//!
//! let source = CsvDataSource::new("data");
//! let catalog = MovieCatalog::from_movies(source.load_movies()?);
//! let ratings = source.load_ratings()?;
//!
//! println!("{} movies, {} ratings", catalog.len(), ratings.len());
//! ```
//!
//! A missing CSV file loads as an empty vector (with a warning), never as
//! an error; callers decide whether empty data is fatal for them.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod source;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use source::{CsvDataSource, DataSource, InMemoryDataSource};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    MovieCatalog,
};
