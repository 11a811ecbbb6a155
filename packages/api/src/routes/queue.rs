use axum::{extract::State, routing::post, Json, Router};
use tracing::error;

use crate::{error::ApiError, state::AppState};
use shared::models::queue::requests::{JoinQueueRequest, LeaveQueueRequest};
use shared::models::queue::responses::QueueResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/queue/join", post(join_queue))
        .route("/queue/leave", post(leave_queue))
}

async fn join_queue(
    State(state): State<AppState>,
    Json(payload): Json<JoinQueueRequest>,
) -> Result<Json<QueueResponse>, ApiError> {
    state
        .queue_service
        .join_queue(&payload.player_id, payload.rating)
        .await
        .map_err(|e| {
            error!("Failed to join queue for player {}: {}", payload.player_id, e);
            ApiError::from(e)
        })?;

    Ok(Json(QueueResponse::ok()))
}

async fn leave_queue(
    State(state): State<AppState>,
    Json(payload): Json<LeaveQueueRequest>,
) -> Result<Json<QueueResponse>, ApiError> {
    state
        .queue_service
        .leave_queue(&payload.player_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to leave queue for player {}: {}",
                payload.player_id, e
            );
            ApiError::from(e)
        })?;

    Ok(Json(QueueResponse::ok()))
}
