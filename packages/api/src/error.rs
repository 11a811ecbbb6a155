use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::matchmaking::responses::ErrorResponse;
use shared::repositories::errors::game_repository_errors::GameSessionRepositoryError;
use shared::services::errors::{
    matchmaking_service_errors::MatchmakingServiceError, queue_service_errors::QueueServiceError,
    settlement_service_errors::SettlementServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    QueueService(QueueServiceError),
    MatchmakingService(MatchmakingServiceError),
    SettlementService(SettlementServiceError),
}

impl From<QueueServiceError> for ApiError {
    fn from(error: QueueServiceError) -> Self {
        ApiError::QueueService(error)
    }
}

impl From<MatchmakingServiceError> for ApiError {
    fn from(error: MatchmakingServiceError) -> Self {
        ApiError::MatchmakingService(error)
    }
}

impl From<SettlementServiceError> for ApiError {
    fn from(error: SettlementServiceError) -> Self {
        ApiError::SettlementService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::QueueService(QueueServiceError::ValidationError(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::QueueService(err @ QueueServiceError::RepositoryError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }

            ApiError::MatchmakingService(MatchmakingServiceError::ValidationError(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::MatchmakingService(
                err @ MatchmakingServiceError::PositionGeneratorError(_),
            ) => (StatusCode::BAD_GATEWAY, err.to_string()),
            // Lost a matchmaking race; the next poll resolves it.
            ApiError::MatchmakingService(MatchmakingServiceError::GameRepositoryError(
                err @ GameSessionRepositoryError::TransactionConflict(_),
            )) => (StatusCode::CONFLICT, err.to_string()),
            ApiError::MatchmakingService(
                err @ (MatchmakingServiceError::QueueRepositoryError(_)
                | MatchmakingServiceError::GameRepositoryError(_)
                | MatchmakingServiceError::RatingRepositoryError(_)),
            ) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),

            ApiError::SettlementService(SettlementServiceError::ValidationError(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::SettlementService(SettlementServiceError::GameNotFound) => {
                (StatusCode::NOT_FOUND, "Game not found".to_string())
            }
            ApiError::SettlementService(
                err @ (SettlementServiceError::RatingError(_)
                | SettlementServiceError::GameRepositoryError(_)
                | SettlementServiceError::RatingRepositoryError(_)),
            ) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        (status, Json(ErrorResponse::new(&message))).into_response()
    }
}
