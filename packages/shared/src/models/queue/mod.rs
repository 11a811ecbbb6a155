pub mod requests;
pub mod responses;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player waiting in the matchmaking queue.
/// One DynamoDB item per player, partitioned by `player_id`, so writing a
/// fresh entry replaces any previous one for the same player.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueEntry {
    pub player_id: String,
    pub rating: i32,
    pub joined_at: DateTime<Utc>,
}

impl QueueEntry {
    pub fn new(player_id: &str, rating: i32) -> Self {
        QueueEntry {
            player_id: player_id.to_string(),
            rating,
            joined_at: Utc::now(),
        }
    }
}
