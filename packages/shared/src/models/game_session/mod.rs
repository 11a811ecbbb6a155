pub mod requests;
pub mod responses;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Completed,
    Abandoned,
}

/// Terminal outcome requested by a settlement call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Completed,
    Abandoned,
}

impl GameOutcome {
    pub fn as_status(&self) -> GameStatus {
        match self {
            GameOutcome::Completed => GameStatus::Completed,
            GameOutcome::Abandoned => GameStatus::Abandoned,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub game_id: String,
    pub white_player_id: String,
    pub black_player_id: String,
    pub starting_fen: String,
    pub game_status: GameStatus,
    pub winner_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    pub fn new(white_player_id: &str, black_player_id: &str, starting_fen: &str) -> Self {
        GameSession {
            game_id: Uuid::new_v4().to_string(),
            white_player_id: white_player_id.to_string(),
            black_player_id: black_player_id.to_string(),
            starting_fen: starting_fen.to_string(),
            game_status: GameStatus::Ongoing,
            winner_id: None,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.game_status == GameStatus::Ongoing
    }

    pub fn is_participant(&self, player_id: &str) -> bool {
        self.white_player_id == player_id || self.black_player_id == player_id
    }

    /// The other participant, or None if `player_id` is not in this game.
    pub fn opponent_of(&self, player_id: &str) -> Option<&str> {
        if self.white_player_id == player_id {
            Some(&self.black_player_id)
        } else if self.black_player_id == player_id {
            Some(&self.white_player_id)
        } else {
            None
        }
    }
}

/// Marks a session as eligible for real-time play. Created in the same
/// transaction as its GameSession and deleted when the game leaves Ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveRegistration {
    pub game_id: String,
    pub socket_room: String,
}

impl LiveRegistration {
    pub fn new(game_id: &str) -> Self {
        LiveRegistration {
            game_id: game_id.to_string(),
            socket_room: format!("game_{}", game_id),
        }
    }
}
