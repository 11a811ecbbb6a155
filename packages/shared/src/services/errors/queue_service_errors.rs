use crate::repositories::errors::queue_repository_errors::QueueRepositoryError;

#[derive(Debug)]
pub enum QueueServiceError {
    ValidationError(String),
    RepositoryError(QueueRepositoryError),
}

impl std::fmt::Display for QueueServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            QueueServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for QueueServiceError {}

impl From<QueueRepositoryError> for QueueServiceError {
    fn from(err: QueueRepositoryError) -> Self {
        QueueServiceError::RepositoryError(err)
    }
}
