//! Parser for the catalog and ratings CSV files.
//!
//! This module handles parsing the two tabular sources:
//! - movies.csv: movie_id,title,genres,director,cast,rating,year,description
//! - user_ratings.csv: user_id,movie_id,rating
//!
//! Rows are deserialized into flat `*Record` structs with serde and then
//! converted into domain types, so the CSV layout stays out of `types`.
//! Parsers work over any `Read` so tests can feed in-memory strings.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::io::Read;

/// Raw row of movies.csv
#[derive(Debug, Deserialize)]
struct MovieRecord {
    movie_id: MovieId,
    title: String,
    genres: Option<String>,
    director: Option<String>,
    cast: Option<String>,
    rating: f32,
    year: u16,
    description: Option<String>,
}

/// Raw row of user_ratings.csv
#[derive(Debug, Deserialize)]
struct RatingRecord {
    user_id: UserId,
    movie_id: MovieId,
    rating: f32,
}

/// Parse movies.csv content
///
/// `file` is only used for error messages.
pub fn parse_movies<R: Read>(reader: R, file: &str) -> Result<Vec<Movie>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut movies = Vec::new();

    for result in csv_reader.deserialize::<MovieRecord>() {
        let record = result.map_err(|e| csv_error(file, e))?;
        check_finite("rating", record.rating)?;

        movies.push(Movie {
            id: record.movie_id,
            title: record.title,
            genres: split_tags(record.genres.as_deref().unwrap_or_default()),
            director: record.director.unwrap_or_default(),
            cast: split_tags(record.cast.as_deref().unwrap_or_default()),
            rating: record.rating,
            year: record.year,
            description: record.description.unwrap_or_default(),
        });
    }
    Ok(movies)
}

/// Parse user_ratings.csv content
pub fn parse_ratings<R: Read>(reader: R, file: &str) -> Result<Vec<Rating>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut ratings = Vec::new();

    for result in csv_reader.deserialize::<RatingRecord>() {
        let record = result.map_err(|e| csv_error(file, e))?;
        check_finite("rating", record.rating)?;

        ratings.push(Rating {
            user_id: record.user_id,
            movie_id: record.movie_id,
            rating: record.rating,
        });
    }
    Ok(ratings)
}

/// Split a `|`-separated tag list
///
/// Example: "Action|Sci-Fi" -> ["Action", "Sci-Fi"]
///          "" -> []
pub fn split_tags(s: &str) -> Vec<String> {
    s.split('|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn check_finite(field: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DataLoadError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Deserialization failures carry a line number; turn them into ParseError
/// so they read like every other malformed-row report.
fn csv_error(file: &str, err: csv::Error) -> DataLoadError {
    if let (Some(pos), csv::ErrorKind::Deserialize { err: de, .. }) = (err.position(), err.kind()) {
        return DataLoadError::ParseError {
            file: file.to_string(),
            line: pos.line() as usize,
            reason: de.to_string(),
        };
    }
    DataLoadError::Csv {
        file: file.to_string(),
        source: err,
    }
}
