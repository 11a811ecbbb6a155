use crate::rating::RatingError;
use crate::repositories::errors::game_repository_errors::GameSessionRepositoryError;
use crate::repositories::errors::rating_repository_errors::RatingRepositoryError;

#[derive(Debug)]
pub enum SettlementServiceError {
    ValidationError(String),
    GameNotFound,
    RatingError(RatingError),
    GameRepositoryError(GameSessionRepositoryError),
    RatingRepositoryError(RatingRepositoryError),
}

impl std::fmt::Display for SettlementServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettlementServiceError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            SettlementServiceError::GameNotFound => write!(f, "Game not found"),
            SettlementServiceError::RatingError(err) => write!(f, "Rating error: {}", err),
            SettlementServiceError::GameRepositoryError(err) => {
                write!(f, "Game repository error: {}", err)
            }
            SettlementServiceError::RatingRepositoryError(err) => {
                write!(f, "Rating repository error: {}", err)
            }
        }
    }
}

impl std::error::Error for SettlementServiceError {}

impl From<RatingError> for SettlementServiceError {
    fn from(err: RatingError) -> Self {
        SettlementServiceError::RatingError(err)
    }
}

impl From<GameSessionRepositoryError> for SettlementServiceError {
    fn from(err: GameSessionRepositoryError) -> Self {
        SettlementServiceError::GameRepositoryError(err)
    }
}

impl From<RatingRepositoryError> for SettlementServiceError {
    fn from(err: RatingRepositoryError) -> Self {
        SettlementServiceError::RatingRepositoryError(err)
    }
}
