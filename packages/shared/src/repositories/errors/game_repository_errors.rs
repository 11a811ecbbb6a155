#[derive(Debug)]
pub enum GameSessionRepositoryError {
    Serialization(String),
    DynamoDb(String),
    /// The match transaction was cancelled because a queue entry it
    /// conditionally deleted was gone, i.e. a concurrent coordinator
    /// already matched one of the participants.
    TransactionConflict(String),
}

impl std::fmt::Display for GameSessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameSessionRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            GameSessionRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            GameSessionRepositoryError::TransactionConflict(msg) => {
                write!(f, "Transaction conflict: {}", msg)
            }
        }
    }
}

impl std::error::Error for GameSessionRepositoryError {}
