use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::services::errors::chess_service_errors::ChessServiceError;

#[cfg(test)]
use mockall::automock;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// External generator of randomized legal starting positions. Failures
/// (including timeouts) are surfaced to the caller, never swallowed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PositionGenerator: Send + Sync {
    async fn starting_position(&self) -> Result<String, ChessServiceError>;
}

#[derive(Debug, Deserialize)]
struct StartGameResponse {
    fen: String,
}

/// Client for the Chess360 position service.
pub struct Chess360Client {
    client: reqwest::Client,
    base_url: String,
}

impl Chess360Client {
    pub fn new(base_url: &str) -> Self {
        // A client without the timeout could hang a matchmaking poll, so
        // a broken TLS backend is fatal at startup rather than papered
        // over with Client::default().
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client for the position service");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var("CHESS_SERVICE_URL")
            .expect("CHESS_SERVICE_URL environment variable must be set");
        Self::new(&base_url)
    }
}

#[async_trait]
impl PositionGenerator for Chess360Client {
    async fn starting_position(&self) -> Result<String, ChessServiceError> {
        let url = format!("{}/chess/game/start", self.base_url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ChessServiceError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChessServiceError::Http(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let body: StartGameResponse = response
            .json()
            .await
            .map_err(|e| ChessServiceError::InvalidResponse(e.to_string()))?;

        if body.fen.is_empty() {
            return Err(ChessServiceError::InvalidResponse(
                "empty fen in response".to_string(),
            ));
        }

        Ok(body.fen)
    }
}
