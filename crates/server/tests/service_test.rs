//! End-to-end tests: CSV files on disk -> configured service -> responses.

use server::{
    Method, ModelState, MovieQuery, RecommendationService, ServiceConfig, ServiceError,
};
use std::fs;
use tempfile::TempDir;

const MOVIES_CSV: &str = "\
movie_id,title,genres,director,cast,rating,year,description
1,The Matrix,Action|Sci-Fi,Lana Wachowski,Keanu Reeves|Carrie-Anne Moss,8.7,1999,A hacker learns the truth
2,John Wick,Action|Thriller,Chad Stahelski,Keanu Reeves,7.4,2014,A retired hitman returns
3,The Shawshank Redemption,Drama,Frank Darabont,Tim Robbins|Morgan Freeman,9.3,1994,Two imprisoned men bond
4,The Green Mile,Drama|Fantasy,Frank Darabont,Tom Hanks,8.6,1999,A death row guard meets a gifted inmate
";

const RATINGS_CSV: &str = "\
user_id,movie_id,rating
1,1,5
1,2,4
1,3,2
2,1,5
2,2,5
2,4,1
3,3,5
3,4,5
3,1,2
";

fn write_data_dir(ratings: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("movies.csv"), MOVIES_CSV).unwrap();
    if let Some(ratings) = ratings {
        fs::write(dir.path().join("user_ratings.csv"), ratings).unwrap();
    }
    dir
}

fn config_for(dir: &TempDir) -> ServiceConfig {
    ServiceConfig {
        data_dir: dir.path().to_path_buf(),
        ..ServiceConfig::default()
    }
}

#[tokio::test]
async fn test_service_from_csv_directory() {
    let dir = write_data_dir(Some(RATINGS_CSV));
    let service = RecommendationService::from_config(&config_for(&dir)).await.unwrap();

    let health = service.health();
    assert_eq!(health.models.content_based, ModelState::Ready);
    assert_eq!(health.models.collaborative, ModelState::Ready);

    let listing = service
        .list_movies(&MovieQuery::default().with_genre("DRAMA"))
        .unwrap();
    let ids: Vec<u32> = listing.movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![3, 4]);

    let similar = service.content_recommendations(3, 1).unwrap();
    assert_eq!(similar.recommendations[0].movie.id, 4);

    // User 1 has not rated movie 4; user 2 (similar taste) rated it 1
    let personal = service.collaborative_recommendations(1, 5).unwrap();
    assert_eq!(personal.method, Method::CollaborativeFiltering);
    assert!(personal.recommendations.iter().all(|r| r.movie.id == 4));
}

#[tokio::test]
async fn test_missing_ratings_file_degrades_gracefully() {
    let dir = write_data_dir(None);
    let service = RecommendationService::from_config(&config_for(&dir)).await.unwrap();

    let health = service.health();
    assert_eq!(health.models.content_based, ModelState::Ready);
    assert_eq!(health.models.collaborative, ModelState::NotInitialized);

    assert!(service.content_recommendations(1, 3).is_ok());
    assert!(matches!(
        service.collaborative_recommendations(1, 3),
        Err(ServiceError::DataUnavailable(_))
    ));
}

#[tokio::test]
async fn test_malformed_ratings_leave_collaborative_unfitted() {
    let dir = write_data_dir(Some("user_id,movie_id,rating\n1,1,not-a-number\n"));
    let service = RecommendationService::from_config(&config_for(&dir)).await.unwrap();

    assert_eq!(service.health().models.collaborative, ModelState::NotInitialized);
    assert_eq!(service.health().models.content_based, ModelState::Ready);
}

#[tokio::test]
async fn test_response_json_shape() {
    let dir = write_data_dir(Some(RATINGS_CSV));
    let service = RecommendationService::from_config(&config_for(&dir)).await.unwrap();

    let health = serde_json::to_value(service.health()).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["api_version"], "1.0.0");
    assert_eq!(health["models"]["content_based"], "ready");

    let content = serde_json::to_value(service.content_recommendations(1, 2).unwrap()).unwrap();
    assert_eq!(content["method"], "content-based");
    assert_eq!(content["movie_id"], 1);
    assert_eq!(content["count"], 2);
    assert!(content.get("user_id").is_none());
    assert!(content["recommendations"][0].get("similarity_score").is_some());

    let cold = serde_json::to_value(service.collaborative_recommendations(99, 2).unwrap()).unwrap();
    assert_eq!(cold["method"], "collaborative-filtering");
    assert_eq!(cold["user_id"], 99);
    assert!(cold["recommendations"][0].get("predicted_rating").is_none());

    let listing = serde_json::to_value(service.list_movies(&MovieQuery::default()).unwrap()).unwrap();
    assert_eq!(listing["count"], 4);
    assert!(listing["filters"]["genre"].is_null());
}
