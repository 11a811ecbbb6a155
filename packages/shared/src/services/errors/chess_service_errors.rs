#[derive(Debug)]
pub enum ChessServiceError {
    Http(String),
    InvalidResponse(String),
}

impl std::fmt::Display for ChessServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChessServiceError::Http(msg) => write!(f, "Chess service request failed: {}", msg),
            ChessServiceError::InvalidResponse(msg) => {
                write!(f, "Chess service returned an invalid response: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChessServiceError {}
