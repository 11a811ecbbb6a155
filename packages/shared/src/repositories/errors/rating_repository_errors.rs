#[derive(Debug)]
pub enum RatingRepositoryError {
    NotFound,
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for RatingRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingRepositoryError::NotFound => write!(f, "Player rating not found"),
            RatingRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            RatingRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for RatingRepositoryError {}
