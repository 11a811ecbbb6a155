use serde::Deserialize;

use crate::models::game_session::GameOutcome;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndGameRequest {
    pub game_id: String,
    pub outcome: GameOutcome,
    pub winner_id: Option<String>,
}
