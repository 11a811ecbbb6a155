use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentInfo {
    pub id: String,
    pub rating: f64,
}

/// Poll answer for `/matchmaking/check`: either a game to join or a prompt
/// to keep polling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent: Option<OpponentInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_white: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_position: Option<String>,
}

impl MatchResponse {
    pub fn matched(
        game_id: &str,
        opponent: OpponentInfo,
        is_white: bool,
        starting_position: &str,
    ) -> Self {
        MatchResponse {
            status: "matched".to_string(),
            game_id: Some(game_id.to_string()),
            opponent: Some(opponent),
            is_white: Some(is_white),
            starting_position: Some(starting_position.to_string()),
        }
    }

    pub fn searching() -> Self {
        MatchResponse {
            status: "searching".to_string(),
            game_id: None,
            opponent: None,
            is_white: None,
            starting_position: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            message: message.to_string(),
        }
    }
}
