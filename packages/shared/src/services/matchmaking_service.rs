use std::sync::Arc;

use tracing::{debug, info};

use crate::models::game_session::{GameSession, LiveRegistration};
use crate::models::queue::QueueEntry;
use crate::repositories::game_repository::GameSessionRepository;
use crate::repositories::queue_repository::QueueRepository;
use crate::repositories::rating_repository::RatingRepository;
use crate::services::chess_service::PositionGenerator;
use crate::services::errors::matchmaking_service_errors::MatchmakingServiceError;

/// Maximum rating difference between matched players.
pub const DEFAULT_RATING_WINDOW: i32 = 100;

/// Color-assignment coin, injected so tests are deterministic.
pub trait FairCoin: Send + Sync {
    fn flip(&self) -> bool;
}

pub struct RandomCoin;

impl FairCoin for RandomCoin {
    fn flip(&self) -> bool {
        rand::random::<bool>()
    }
}

#[derive(Debug, Clone)]
pub struct MatchedGame {
    pub game_id: String,
    pub opponent_id: String,
    pub opponent_rating: f64,
    pub is_white: bool,
    pub starting_fen: String,
}

#[derive(Debug, Clone)]
pub enum MatchOutcome {
    Matched(MatchedGame),
    Searching,
}

/// Fairness policy: the compatible candidate that has waited longest.
pub fn select_opponent(candidates: &[QueueEntry]) -> Option<QueueEntry> {
    candidates.iter().min_by_key(|entry| entry.joined_at).cloned()
}

#[derive(Clone)]
pub struct MatchmakingService {
    queue_repository: Arc<dyn QueueRepository + Send + Sync>,
    game_repository: Arc<dyn GameSessionRepository + Send + Sync>,
    rating_repository: Arc<dyn RatingRepository + Send + Sync>,
    position_generator: Arc<dyn PositionGenerator + Send + Sync>,
    coin: Arc<dyn FairCoin + Send + Sync>,
    rating_window: i32,
}

impl MatchmakingService {
    pub fn new(
        queue_repository: Arc<dyn QueueRepository + Send + Sync>,
        game_repository: Arc<dyn GameSessionRepository + Send + Sync>,
        rating_repository: Arc<dyn RatingRepository + Send + Sync>,
        position_generator: Arc<dyn PositionGenerator + Send + Sync>,
        coin: Arc<dyn FairCoin + Send + Sync>,
        rating_window: i32,
    ) -> Self {
        MatchmakingService {
            queue_repository,
            game_repository,
            rating_repository,
            position_generator,
            coin,
            rating_window,
        }
    }

    /// One matchmaking poll: an ongoing game wins over a new match, a new
    /// match wins over "searching". Safe to call repeatedly; a client that
    /// missed a response just polls again.
    pub async fn request_match(
        &self,
        player_id: &str,
    ) -> Result<MatchOutcome, MatchmakingServiceError> {
        if player_id.is_empty() {
            return Err(MatchmakingServiceError::ValidationError(
                "no player id provided".to_string(),
            ));
        }

        // An already-matched player gets the same game back, never a new one.
        if let Some(session) = self.game_repository.find_ongoing_for_player(player_id).await? {
            return self.describe_existing(&session, player_id).await;
        }

        let entry = match self.queue_repository.get_entry(player_id).await? {
            Some(entry) => entry,
            None => return Ok(MatchOutcome::Searching),
        };

        let candidates = self
            .queue_repository
            .find_in_window(
                player_id,
                entry.rating - self.rating_window,
                entry.rating + self.rating_window,
            )
            .await?;

        let opponent = match select_opponent(&candidates) {
            Some(opponent) => opponent,
            None => {
                debug!("No compatible opponent for player {}", player_id);
                return Ok(MatchOutcome::Searching);
            }
        };

        // Report the profile rating, not the queue snapshot, so a fresh
        // match and a re-poll describe the opponent identically.
        let opponent_rating = self.rating_repository.get_rating(&opponent.player_id).await?;

        let starting_fen = self.position_generator.starting_position().await?;

        let requester_is_white = self.coin.flip();
        let (white_id, black_id) = if requester_is_white {
            (player_id, opponent.player_id.as_str())
        } else {
            (opponent.player_id.as_str(), player_id)
        };

        let session = GameSession::new(white_id, black_id, &starting_fen);
        let registration = LiveRegistration::new(&session.game_id);

        // One transaction: session + live registration in, both queue
        // entries out. A failure anywhere leaves both players queued.
        self.game_repository
            .create_matched_game(&session, &registration)
            .await?;

        info!(
            "Game {} created: {} (white) vs {} (black)",
            session.game_id, session.white_player_id, session.black_player_id
        );

        Ok(MatchOutcome::Matched(MatchedGame {
            game_id: session.game_id,
            opponent_id: opponent.player_id,
            opponent_rating,
            is_white: requester_is_white,
            starting_fen,
        }))
    }

    async fn describe_existing(
        &self,
        session: &GameSession,
        player_id: &str,
    ) -> Result<MatchOutcome, MatchmakingServiceError> {
        let opponent_id = session.opponent_of(player_id).ok_or_else(|| {
            MatchmakingServiceError::ValidationError(format!(
                "player {} is not part of game {}",
                player_id, session.game_id
            ))
        })?;

        let opponent_rating = self.rating_repository.get_rating(opponent_id).await?;

        Ok(MatchOutcome::Matched(MatchedGame {
            game_id: session.game_id.clone(),
            opponent_id: opponent_id.to_string(),
            opponent_rating,
            is_white: session.white_player_id == player_id,
            starting_fen: session.starting_fen.clone(),
        }))
    }
}
