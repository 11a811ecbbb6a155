use crate::repositories::errors::game_repository_errors::GameSessionRepositoryError;
use crate::repositories::errors::queue_repository_errors::QueueRepositoryError;
use crate::repositories::errors::rating_repository_errors::RatingRepositoryError;
use crate::services::errors::chess_service_errors::ChessServiceError;

#[derive(Debug)]
pub enum MatchmakingServiceError {
    ValidationError(String),
    PositionGeneratorError(ChessServiceError),
    QueueRepositoryError(QueueRepositoryError),
    GameRepositoryError(GameSessionRepositoryError),
    RatingRepositoryError(RatingRepositoryError),
}

impl std::fmt::Display for MatchmakingServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchmakingServiceError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            MatchmakingServiceError::PositionGeneratorError(err) => {
                write!(f, "Position generator error: {}", err)
            }
            MatchmakingServiceError::QueueRepositoryError(err) => {
                write!(f, "Queue repository error: {}", err)
            }
            MatchmakingServiceError::GameRepositoryError(err) => {
                write!(f, "Game repository error: {}", err)
            }
            MatchmakingServiceError::RatingRepositoryError(err) => {
                write!(f, "Rating repository error: {}", err)
            }
        }
    }
}

impl std::error::Error for MatchmakingServiceError {}

impl From<ChessServiceError> for MatchmakingServiceError {
    fn from(err: ChessServiceError) -> Self {
        MatchmakingServiceError::PositionGeneratorError(err)
    }
}

impl From<QueueRepositoryError> for MatchmakingServiceError {
    fn from(err: QueueRepositoryError) -> Self {
        MatchmakingServiceError::QueueRepositoryError(err)
    }
}

impl From<GameSessionRepositoryError> for MatchmakingServiceError {
    fn from(err: GameSessionRepositoryError) -> Self {
        MatchmakingServiceError::GameRepositoryError(err)
    }
}

impl From<RatingRepositoryError> for MatchmakingServiceError {
    fn from(err: RatingRepositoryError) -> Self {
        MatchmakingServiceError::RatingRepositoryError(err)
    }
}
