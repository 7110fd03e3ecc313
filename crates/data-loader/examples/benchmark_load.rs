use data_loader::{CsvDataSource, DataSource, MovieCatalog};
use std::time::Instant;

fn main() {
    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let source = CsvDataSource::new(&data_dir);

    println!("Loading catalog and ratings from {}...\n", data_dir);

    let start = Instant::now();
    let movies = source.load_movies().expect("Failed to load movies");
    let ratings = source.load_ratings().expect("Failed to load ratings");
    let catalog = MovieCatalog::from_movies(movies);
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Ratings: {}", ratings.len());
    println!("\nPerformance: {:.0} ratings/second",
             ratings.len() as f64 / elapsed.as_secs_f64());
}
