use axum::{extract::State, routing::post, Json, Router};
use tracing::error;

use crate::{error::ApiError, state::AppState};
use shared::models::matchmaking::requests::MatchRequest;
use shared::models::matchmaking::responses::{MatchResponse, OpponentInfo};
use shared::services::matchmaking_service::MatchOutcome;

pub fn routes() -> Router<AppState> {
    Router::new().route("/matchmaking/check", post(check_match))
}

async fn check_match(
    State(state): State<AppState>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let outcome = state
        .matchmaking_service
        .request_match(&payload.player_id)
        .await
        .map_err(|e| {
            error!("Matchmaking failed for player {}: {}", payload.player_id, e);
            ApiError::from(e)
        })?;

    let response = match outcome {
        MatchOutcome::Matched(game) => MatchResponse::matched(
            &game.game_id,
            OpponentInfo {
                id: game.opponent_id,
                rating: game.opponent_rating,
            },
            game.is_white,
            &game.starting_fen,
        ),
        MatchOutcome::Searching => MatchResponse::searching(),
    };

    Ok(Json(response))
}
