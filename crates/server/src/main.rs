//! Service harness.
//!
//! Loads the configured data directory, fits both models and logs a short
//! report: model health, the top of the catalog, and a sample request for
//! each recommendation method.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::{MovieQuery, RecommendationService, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,recommenders=debug")),
        )
        .init();

    info!("Starting movie recommendation service");

    let config = ServiceConfig::from_env().context("Failed to load configuration")?;
    let service = RecommendationService::from_config(&config)
        .await
        .context("Failed to initialize service")?;

    let health = service.health();
    info!("Health: {}", serde_json::to_string(&health)?);

    match service.list_movies(&MovieQuery::default().with_limit(5)) {
        Ok(listing) => {
            info!("Top {} movies:", listing.count);
            for (i, movie) in listing.movies.iter().enumerate() {
                info!("{}. {} ({}) - {:.1}", i + 1, movie.title, movie.year, movie.rating);
            }
        }
        Err(e) => warn!("Catalog unavailable: {}", e),
    }

    if let Some(seed) = service.catalog().at(0) {
        match service.content_recommendations(seed.id, 5) {
            Ok(response) => {
                info!("Movies like '{}':", seed.title);
                for rec in &response.recommendations {
                    info!(
                        "   {} - similarity {:.3}",
                        rec.movie.title,
                        rec.similarity_score.unwrap_or_default()
                    );
                }
            }
            Err(e) => warn!("Content-based request failed: {}", e),
        }
    }

    match service.collaborative_recommendations(1, 5) {
        Ok(response) => {
            info!("Recommendations for user 1:");
            for rec in &response.recommendations {
                match rec.predicted_rating {
                    Some(predicted) => info!("   {} - predicted {:.2}", rec.movie.title, predicted),
                    None => info!("   {} - popular pick", rec.movie.title),
                }
            }
        }
        Err(e) => warn!("Collaborative request failed: {}", e),
    }

    Ok(())
}
