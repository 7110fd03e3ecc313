use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Movie, MovieId, UserId};
use serde::Serialize;
use server::{
    HealthReport, ModelState, MovieQuery, RecommendationResponse, RecommendationService,
    ServiceConfig, DEFAULT_MOVIE_LIMIT, DEFAULT_RECOMMENDATION_LIMIT,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

/// movie-recs - Content-based and collaborative movie recommendations
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendations from a catalog and user ratings", long_about = None)]
struct Cli {
    /// Directory holding movies.csv and user_ratings.csv
    /// (overrides MOVIE_RECS_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// TF-IDF vocabulary cap (overrides MOVIE_RECS_MAX_FEATURES)
    #[arg(long)]
    max_features: Option<usize>,

    /// Print the raw JSON response instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog, best rated first
    Movies {
        /// Number of movies to return (1-100)
        #[arg(long, default_value_t = DEFAULT_MOVIE_LIMIT)]
        limit: usize,

        /// Genre filter (case-insensitive substring)
        #[arg(long)]
        genre: Option<String>,

        /// Minimum catalog rating (0-10)
        #[arg(long)]
        min_rating: Option<f32>,
    },

    /// Show one movie
    Movie {
        #[arg(long)]
        movie_id: MovieId,
    },

    /// Movies similar to a given movie (content-based)
    Similar {
        #[arg(long)]
        movie_id: MovieId,

        /// Number of recommendations to return (1-50)
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: usize,
    },

    /// Personalized recommendations for a user (collaborative filtering)
    Recommend {
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return (1-50)
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATION_LIMIT)]
        limit: usize,
    },

    /// Report whether both models are ready
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Environment first, flags on top
    let mut config = ServiceConfig::from_env().context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(max_features) = cli.max_features {
        config.max_features = max_features;
    }
    debug!("Using configuration {:?}", config);

    if !cli.json {
        println!("Loading data from {}...", config.data_dir.display());
    }
    let start = Instant::now();
    let service = RecommendationService::from_config(&config)
        .await
        .context("Failed to initialize recommendation service")?;
    if !cli.json {
        println!("{} Models fitted in {:?}", "✓".green(), start.elapsed());
    }

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Movies {
            limit,
            genre,
            min_rating,
        } => handle_movies(&service, limit, genre, min_rating, cli.json)?,
        Commands::Movie { movie_id } => handle_movie(&service, movie_id, cli.json)?,
        Commands::Similar { movie_id, limit } => handle_similar(&service, movie_id, limit, cli.json)?,
        Commands::Recommend { user_id, limit } => {
            handle_recommend(&service, user_id, limit, cli.json)?
        }
        Commands::Health => handle_health(&service, cli.json)?,
    }

    Ok(())
}

/// Handle the 'movies' command
fn handle_movies(
    service: &RecommendationService,
    limit: usize,
    genre: Option<String>,
    min_rating: Option<f32>,
    json: bool,
) -> Result<()> {
    let query = MovieQuery {
        limit,
        genre,
        min_rating,
    };
    let listing = service.list_movies(&query).context("Failed to list movies")?;

    if json {
        return print_json(&listing);
    }

    println!("{}", format!("{} movies:", listing.count).bold().blue());
    for (i, movie) in listing.movies.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - {:.1}",
            (i + 1).to_string().green(),
            movie.title,
            movie.year,
            movie.genres.join(", "),
            movie.rating
        );
    }
    Ok(())
}

/// Handle the 'movie' command
fn handle_movie(service: &RecommendationService, movie_id: MovieId, json: bool) -> Result<()> {
    let movie = service.get_movie(movie_id)?;

    if json {
        return print_json(&movie);
    }
    print_movie(&movie);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    service: &RecommendationService,
    movie_id: MovieId,
    limit: usize,
    json: bool,
) -> Result<()> {
    let response = service
        .content_recommendations(movie_id, limit)
        .with_context(|| format!("No similar movies for movie {}", movie_id))?;

    if json {
        return print_json(&response);
    }

    if let Ok(seed) = service.get_movie(movie_id) {
        println!("{}", format!("Movies similar to '{}':", seed.title).bold().blue());
    }
    print_recommendations(&response);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    service: &RecommendationService,
    user_id: UserId,
    limit: usize,
    json: bool,
) -> Result<()> {
    let response = service
        .collaborative_recommendations(user_id, limit)
        .with_context(|| format!("No recommendations for user {}", user_id))?;

    if json {
        return print_json(&response);
    }

    println!(
        "{}",
        format!("Recommendations for user {}:", user_id).bold().blue()
    );
    print_recommendations(&response);
    Ok(())
}

/// Handle the 'health' command
fn handle_health(service: &RecommendationService, json: bool) -> Result<()> {
    let health = service.health();

    if json {
        return print_json(&health);
    }
    print_health(&health);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_movie(movie: &Movie) {
    println!("{}", format!("{} ({})", movie.title, movie.year).bold().blue());
    println!("{}ID: {}", "• ".green(), movie.id);
    println!("{}Genres: {}", "• ".green(), movie.genres.join(", "));
    println!("{}Director: {}", "• ".green(), movie.director);
    println!("{}Cast: {}", "• ".green(), movie.cast.join(", "));
    println!("{}Rating: {:.1}", "• ".cyan(), movie.rating);
    if !movie.description.is_empty() {
        println!("\n{}", movie.description);
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(response: &RecommendationResponse) {
    for (i, rec) in response.recommendations.iter().enumerate() {
        let score = match (rec.similarity_score, rec.predicted_rating) {
            (Some(similarity), _) => format!("Similarity: {:.3}", similarity),
            (None, Some(predicted)) => format!("Predicted: {:.2}", predicted),
            (None, None) => format!("Popular pick, rated {:.1}", rec.movie.rating),
        };
        println!(
            "{}. {} ({}) [{}] - {}",
            (i + 1).to_string().green(),
            rec.movie.title,
            rec.movie.year,
            rec.movie.genres.join(", "),
            score
        );
    }
}

fn print_health(health: &HealthReport) {
    let state = |s: ModelState| match s {
        ModelState::Ready => "ready".green(),
        ModelState::NotInitialized => "not initialized".red(),
    };
    println!(
        "{} (API {})",
        health.status.bold().blue(),
        health.api_version
    );
    println!("{}content-based: {}", "• ".green(), state(health.models.content_based));
    println!("{}collaborative: {}", "• ".green(), state(health.models.collaborative));
}
