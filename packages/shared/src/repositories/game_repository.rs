use crate::models::game_session::{GameSession, LiveRegistration};
use crate::repositories::errors::game_repository_errors::GameSessionRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem, Update};
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

/// A profile rating write carried inside the settlement transaction.
#[derive(Debug, Clone)]
pub struct RatingUpdate {
    pub player_id: String,
    pub rating: f64,
}

#[async_trait]
pub trait GameSessionRepository: Send + Sync {
    async fn get_game_session(
        &self,
        game_id: &str,
    ) -> Result<Option<GameSession>, GameSessionRepositoryError>;

    /// The session with status Ongoing that `player_id` participates in,
    /// if any.
    async fn find_ongoing_for_player(
        &self,
        player_id: &str,
    ) -> Result<Option<GameSession>, GameSessionRepositoryError>;

    /// Atomically creates the session and its live registration and removes
    /// both participants from the queue. The queue deletes are conditional
    /// on the entries still existing, so when two coordinators race for the
    /// same waiter exactly one transaction commits; the other rolls back
    /// with `TransactionConflict` and no partial writes.
    async fn create_matched_game(
        &self,
        session: &GameSession,
        registration: &LiveRegistration,
    ) -> Result<(), GameSessionRepositoryError>;

    /// Atomically writes the settled session, deletes its live registration
    /// and applies any rating updates, conditional on the stored session
    /// still being Ongoing. Returns false when the condition fails, i.e. a
    /// concurrent settlement already applied a terminal state.
    async fn settle_game_session(
        &self,
        session: &GameSession,
        rating_updates: Option<(RatingUpdate, RatingUpdate)>,
    ) -> Result<bool, GameSessionRepositoryError>;
}

pub struct DynamoDbGameSessionRepository {
    pub client: Client,
    pub games_table: String,
    pub live_table: String,
    pub queue_table: String,
    pub users_table: String,
}

impl DynamoDbGameSessionRepository {
    pub fn new(client: Client) -> Self {
        let games_table = std::env::var("GAME_SESSIONS_TABLE")
            .expect("GAME_SESSIONS_TABLE environment variable must be set");
        let live_table = std::env::var("ACTIVE_GAMES_TABLE")
            .expect("ACTIVE_GAMES_TABLE environment variable must be set");
        let queue_table = std::env::var("MATCHMAKING_TABLE")
            .expect("MATCHMAKING_TABLE environment variable must be set");
        let users_table =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self {
            client,
            games_table,
            live_table,
            queue_table,
            users_table,
        }
    }

    fn queue_delete(&self, player_id: &str) -> Result<Delete, GameSessionRepositoryError> {
        Delete::builder()
            .table_name(&self.queue_table)
            .key("player_id", AttributeValue::S(player_id.to_string()))
            .condition_expression("attribute_exists(player_id)")
            .build()
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))
    }

    fn rating_write(&self, update: &RatingUpdate) -> Result<Update, GameSessionRepositoryError> {
        Update::builder()
            .table_name(&self.users_table)
            .key("id", AttributeValue::S(update.player_id.clone()))
            .update_expression("SET elo_rating = :rating")
            .expression_attribute_values(":rating", AttributeValue::N(update.rating.to_string()))
            .build()
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl GameSessionRepository for DynamoDbGameSessionRepository {
    async fn get_game_session(
        &self,
        game_id: &str,
    ) -> Result<Option<GameSession>, GameSessionRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.games_table)
            .key("game_id", AttributeValue::S(game_id.to_string()))
            .send()
            .await
            .map_err(|e| GameSessionRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let session: GameSession = from_item(item)
                .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }

    async fn find_ongoing_for_player(
        &self,
        player_id: &str,
    ) -> Result<Option<GameSession>, GameSessionRepositoryError> {
        // Scan applies the filter after each page is read, so a page can
        // legitimately come back empty while later pages still hold the
        // session. Follow last_evaluated_key until it turns up or the
        // table is exhausted.
        let mut exclusive_start_key = None;
        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.games_table)
                .filter_expression(
                    "(white_player_id = :player OR black_player_id = :player) \
                     AND game_status = :ongoing",
                )
                .expression_attribute_values(":player", AttributeValue::S(player_id.to_string()))
                .expression_attribute_values(":ongoing", AttributeValue::S("Ongoing".to_string()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| GameSessionRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(item) = result.items.and_then(|items| items.into_iter().next()) {
                let session: GameSession = from_item(item)
                    .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;
                return Ok(Some(session));
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => return Ok(None),
            }
        }
    }

    async fn create_matched_game(
        &self,
        session: &GameSession,
        registration: &LiveRegistration,
    ) -> Result<(), GameSessionRepositoryError> {
        let session_item = to_item(session)
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;
        let registration_item = to_item(registration)
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;

        let transaction_items = vec![
            TransactWriteItem::builder()
                .put(
                    Put::builder()
                        .table_name(&self.games_table)
                        .set_item(Some(session_item))
                        .condition_expression("attribute_not_exists(game_id)")
                        .build()
                        .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?,
                )
                .build(),
            TransactWriteItem::builder()
                .put(
                    Put::builder()
                        .table_name(&self.live_table)
                        .set_item(Some(registration_item))
                        .build()
                        .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?,
                )
                .build(),
            TransactWriteItem::builder()
                .delete(self.queue_delete(&session.white_player_id)?)
                .build(),
            TransactWriteItem::builder()
                .delete(self.queue_delete(&session.black_player_id)?)
                .build(),
        ];

        let result = self
            .client
            .transact_write_items()
            .set_transact_items(Some(transaction_items))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_transaction_canceled_exception() {
                        return Err(GameSessionRepositoryError::TransactionConflict(
                            e.to_string(),
                        ));
                    }
                }
                Err(GameSessionRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }

    async fn settle_game_session(
        &self,
        session: &GameSession,
        rating_updates: Option<(RatingUpdate, RatingUpdate)>,
    ) -> Result<bool, GameSessionRepositoryError> {
        let session_item = to_item(session)
            .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?;

        let mut transaction_items = vec![
            // The only conditional write, so a cancelled transaction means
            // the session already left Ongoing.
            TransactWriteItem::builder()
                .put(
                    Put::builder()
                        .table_name(&self.games_table)
                        .set_item(Some(session_item))
                        .condition_expression("game_status = :ongoing")
                        .expression_attribute_values(
                            ":ongoing",
                            AttributeValue::S("Ongoing".to_string()),
                        )
                        .build()
                        .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?,
                )
                .build(),
            TransactWriteItem::builder()
                .delete(
                    Delete::builder()
                        .table_name(&self.live_table)
                        .key("game_id", AttributeValue::S(session.game_id.clone()))
                        .build()
                        .map_err(|e| GameSessionRepositoryError::Serialization(e.to_string()))?,
                )
                .build(),
        ];

        if let Some((winner, loser)) = rating_updates {
            transaction_items.push(
                TransactWriteItem::builder()
                    .update(self.rating_write(&winner)?)
                    .build(),
            );
            transaction_items.push(
                TransactWriteItem::builder()
                    .update(self.rating_write(&loser)?)
                    .build(),
            );
        }

        let result = self
            .client
            .transact_write_items()
            .set_transact_items(Some(transaction_items))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_transaction_canceled_exception() {
                        // Lost the settlement race; the winner already
                        // applied a terminal state.
                        return Ok(false);
                    }
                }
                Err(GameSessionRepositoryError::DynamoDb(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::models::game_session::GameStatus;
    use crate::repositories::queue_repository::tests::InMemoryQueueRepository;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory session store wired to an in-memory queue so the match
    /// transaction's all-or-nothing behaviour can be exercised in tests.
    pub struct InMemoryGameRepository {
        pub sessions: Mutex<HashMap<String, GameSession>>,
        pub registrations: Mutex<HashMap<String, LiveRegistration>>,
        pub queue: Arc<InMemoryQueueRepository>,
        pub rating_writes: Mutex<Vec<RatingUpdate>>,
        pub fail_create: Mutex<bool>,
        pub fail_settle: Mutex<bool>,
    }

    impl InMemoryGameRepository {
        pub fn new(queue: Arc<InMemoryQueueRepository>) -> Self {
            Self {
                sessions: Mutex::new(HashMap::new()),
                registrations: Mutex::new(HashMap::new()),
                queue,
                rating_writes: Mutex::new(Vec::new()),
                fail_create: Mutex::new(false),
                fail_settle: Mutex::new(false),
            }
        }

        pub fn insert_session(&self, session: GameSession) {
            self.registrations
                .lock()
                .unwrap()
                .insert(session.game_id.clone(), LiveRegistration::new(&session.game_id));
            self.sessions
                .lock()
                .unwrap()
                .insert(session.game_id.clone(), session);
        }

        pub fn session(&self, game_id: &str) -> Option<GameSession> {
            self.sessions.lock().unwrap().get(game_id).cloned()
        }

        pub fn has_registration(&self, game_id: &str) -> bool {
            self.registrations.lock().unwrap().contains_key(game_id)
        }
    }

    #[async_trait]
    impl GameSessionRepository for InMemoryGameRepository {
        async fn get_game_session(
            &self,
            game_id: &str,
        ) -> Result<Option<GameSession>, GameSessionRepositoryError> {
            Ok(self.session(game_id))
        }

        async fn find_ongoing_for_player(
            &self,
            player_id: &str,
        ) -> Result<Option<GameSession>, GameSessionRepositoryError> {
            let session = self
                .sessions
                .lock()
                .unwrap()
                .values()
                .find(|session| session.is_ongoing() && session.is_participant(player_id))
                .cloned();
            Ok(session)
        }

        async fn create_matched_game(
            &self,
            session: &GameSession,
            registration: &LiveRegistration,
        ) -> Result<(), GameSessionRepositoryError> {
            if *self.fail_create.lock().unwrap() {
                return Err(GameSessionRepositoryError::DynamoDb(
                    "transaction failure".to_string(),
                ));
            }

            // Both conditional deletes must hold before anything mutates.
            if !self.queue.contains(&session.white_player_id)
                || !self.queue.contains(&session.black_player_id)
            {
                return Err(GameSessionRepositoryError::TransactionConflict(
                    "queue entry already taken".to_string(),
                ));
            }

            self.queue.remove_entry(&session.white_player_id);
            self.queue.remove_entry(&session.black_player_id);
            self.sessions
                .lock()
                .unwrap()
                .insert(session.game_id.clone(), session.clone());
            self.registrations
                .lock()
                .unwrap()
                .insert(registration.game_id.clone(), registration.clone());
            Ok(())
        }

        async fn settle_game_session(
            &self,
            session: &GameSession,
            rating_updates: Option<(RatingUpdate, RatingUpdate)>,
        ) -> Result<bool, GameSessionRepositoryError> {
            if *self.fail_settle.lock().unwrap() {
                return Err(GameSessionRepositoryError::DynamoDb(
                    "transaction failure".to_string(),
                ));
            }

            let mut sessions = self.sessions.lock().unwrap();
            match sessions.get(&session.game_id) {
                Some(stored) if stored.game_status == GameStatus::Ongoing => {
                    sessions.insert(session.game_id.clone(), session.clone());
                    self.registrations.lock().unwrap().remove(&session.game_id);
                    if let Some((winner, loser)) = rating_updates {
                        let mut writes = self.rating_writes.lock().unwrap();
                        writes.push(winner);
                        writes.push(loser);
                    }
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    #[tokio::test]
    async fn test_create_matched_game_removes_both_queue_entries() {
        use crate::models::queue::QueueEntry;

        let queue = Arc::new(InMemoryQueueRepository::with_entries(vec![
            QueueEntry::new("white", 1200),
            QueueEntry::new("black", 1250),
        ]));
        let repository = InMemoryGameRepository::new(queue.clone());

        let session = GameSession::new("white", "black", "fen");
        let registration = LiveRegistration::new(&session.game_id);

        repository
            .create_matched_game(&session, &registration)
            .await
            .unwrap();

        assert!(!queue.contains("white"));
        assert!(!queue.contains("black"));
        assert!(repository.session(&session.game_id).is_some());
        assert!(repository.has_registration(&session.game_id));
    }

    #[tokio::test]
    async fn test_create_matched_game_conflicts_when_entry_taken() {
        use crate::models::queue::QueueEntry;

        // Only one of the two participants is still queued.
        let queue = Arc::new(InMemoryQueueRepository::with_entries(vec![
            QueueEntry::new("white", 1200),
        ]));
        let repository = InMemoryGameRepository::new(queue.clone());

        let session = GameSession::new("white", "black", "fen");
        let registration = LiveRegistration::new(&session.game_id);

        let result = repository.create_matched_game(&session, &registration).await;

        assert!(matches!(
            result,
            Err(GameSessionRepositoryError::TransactionConflict(_))
        ));
        // Nothing committed: the surviving entry stays queued.
        assert!(queue.contains("white"));
        assert!(repository.session(&session.game_id).is_none());
    }

    #[tokio::test]
    async fn test_find_ongoing_skips_settled_history() {
        let queue = Arc::new(InMemoryQueueRepository::new());
        let repository = InMemoryGameRepository::new(queue);

        // A backlog of settled games must not mask the live one.
        for n in 0..10 {
            let mut settled = GameSession::new(&format!("a{n}"), &format!("b{n}"), "fen");
            settled.game_status = GameStatus::Completed;
            settled.winner_id = Some(format!("a{n}"));
            repository.insert_session(settled);
        }
        let ongoing = GameSession::new("p", "q", "fen");
        repository.insert_session(ongoing.clone());

        let found = repository
            .find_ongoing_for_player("p")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.game_id, ongoing.game_id);

        // A player with only settled games is not in a game.
        assert!(repository
            .find_ongoing_for_player("a3")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_settle_game_session_applies_once() {
        let queue = Arc::new(InMemoryQueueRepository::new());
        let repository = InMemoryGameRepository::new(queue);

        let session = GameSession::new("white", "black", "fen");
        repository.insert_session(session.clone());

        let mut settled = session.clone();
        settled.game_status = GameStatus::Completed;
        settled.winner_id = Some("white".to_string());

        assert!(repository
            .settle_game_session(&settled, None)
            .await
            .unwrap());
        assert!(!repository.has_registration(&session.game_id));

        // Second attempt loses the condition check.
        assert!(!repository
            .settle_game_session(&settled, None)
            .await
            .unwrap());
    }
}
