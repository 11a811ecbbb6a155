use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::models::game_session::GameOutcome;
use crate::rating::{update_ratings, DEFAULT_K_FACTOR};
use crate::repositories::game_repository::{GameSessionRepository, RatingUpdate};
use crate::repositories::rating_repository::RatingRepository;
use crate::services::errors::settlement_service_errors::SettlementServiceError;

#[derive(Clone)]
pub struct SettlementService {
    game_repository: Arc<dyn GameSessionRepository + Send + Sync>,
    rating_repository: Arc<dyn RatingRepository + Send + Sync>,
}

impl SettlementService {
    pub fn new(
        game_repository: Arc<dyn GameSessionRepository + Send + Sync>,
        rating_repository: Arc<dyn RatingRepository + Send + Sync>,
    ) -> Self {
        SettlementService {
            game_repository,
            rating_repository,
        }
    }

    /// Closes a game exactly once. Settling an already-settled game is Ok
    /// and changes nothing, so callers can retry freely; ratings move only
    /// for a completed game with a recorded winner.
    pub async fn settle(
        &self,
        game_id: &str,
        outcome: GameOutcome,
        winner_id: Option<&str>,
    ) -> Result<(), SettlementServiceError> {
        if game_id.is_empty() {
            return Err(SettlementServiceError::ValidationError(
                "no game id provided".to_string(),
            ));
        }

        let session = self
            .game_repository
            .get_game_session(game_id)
            .await?
            .ok_or(SettlementServiceError::GameNotFound)?;

        if !session.is_ongoing() {
            debug!("Game {} already settled, nothing to apply", game_id);
            return Ok(());
        }

        if let Some(winner) = winner_id {
            if !session.is_participant(winner) {
                return Err(SettlementServiceError::ValidationError(format!(
                    "winner {} is not a participant of game {}",
                    winner, game_id
                )));
            }
        }

        let mut settled = session.clone();
        settled.game_status = outcome.as_status();
        settled.winner_id = winner_id.map(|id| id.to_string());
        settled.ended_at = Some(Utc::now());

        let rating_updates = match (outcome, winner_id) {
            (GameOutcome::Completed, Some(winner)) => {
                // opponent_of cannot fail here, winner was just validated.
                let loser = session
                    .opponent_of(winner)
                    .ok_or(SettlementServiceError::GameNotFound)?;

                let winner_rating = self.rating_repository.get_rating(winner).await?;
                let loser_rating = self.rating_repository.get_rating(loser).await?;

                let (new_winner_rating, new_loser_rating) =
                    update_ratings(winner_rating, loser_rating, DEFAULT_K_FACTOR)?;

                Some((
                    RatingUpdate {
                        player_id: winner.to_string(),
                        rating: new_winner_rating,
                    },
                    RatingUpdate {
                        player_id: loser.to_string(),
                        rating: new_loser_rating,
                    },
                ))
            }
            _ => None,
        };

        let applied = self
            .game_repository
            .settle_game_session(&settled, rating_updates)
            .await?;

        if applied {
            info!("Game {} settled as {:?}", game_id, settled.game_status);
        } else {
            // A concurrent settlement won the race; its result stands.
            debug!("Game {} was settled concurrently", game_id);
        }

        Ok(())
    }
}
