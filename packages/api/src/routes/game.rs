use axum::{extract::State, routing::post, Json, Router};
use tracing::error;

use crate::{error::ApiError, state::AppState};
use shared::models::game_session::requests::EndGameRequest;
use shared::models::game_session::responses::EndGameResponse;

pub fn routes() -> Router<AppState> {
    Router::new().route("/game/end", post(end_game))
}

async fn end_game(
    State(state): State<AppState>,
    Json(payload): Json<EndGameRequest>,
) -> Result<Json<EndGameResponse>, ApiError> {
    state
        .settlement_service
        .settle(
            &payload.game_id,
            payload.outcome,
            payload.winner_id.as_deref(),
        )
        .await
        .map_err(|e| {
            error!("Failed to settle game {}: {}", payload.game_id, e);
            ApiError::from(e)
        })?;

    Ok(Json(EndGameResponse::ok()))
}
