use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod routes;
pub mod state;

use shared::repositories::game_repository::DynamoDbGameSessionRepository;
use shared::repositories::queue_repository::DynamoDbQueueRepository;
use shared::repositories::rating_repository::DynamoDbRatingRepository;
use shared::services::chess_service::Chess360Client;
use shared::services::matchmaking_service::{
    MatchmakingService, RandomCoin, DEFAULT_RATING_WINDOW,
};
use shared::services::queue_service::QueueService;
use shared::services::settlement_service::SettlementService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let queue_repository = Arc::new(DynamoDbQueueRepository::new(client.clone()));
    let game_repository = Arc::new(DynamoDbGameSessionRepository::new(client.clone()));
    let rating_repository = Arc::new(DynamoDbRatingRepository::new(client.clone()));

    let rating_window = std::env::var("MATCHMAKING_RATING_WINDOW")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_RATING_WINDOW);

    let queue_service = Arc::new(QueueService::new(queue_repository.clone()));
    let matchmaking_service = Arc::new(MatchmakingService::new(
        queue_repository,
        game_repository.clone(),
        rating_repository.clone(),
        Arc::new(Chess360Client::from_env()),
        Arc::new(RandomCoin),
        rating_window,
    ));
    let settlement_service = Arc::new(SettlementService::new(game_repository, rating_repository));

    let app_state = state::AppState {
        queue_service,
        matchmaking_service,
        settlement_service,
    };

    // Configure CORS
    // ToDo: Tighten this up
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::queue::routes())
        .merge(routes::matchmaking::routes())
        .merge(routes::game::routes())
        .layer(cors)
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
