use crate::models::queue::QueueEntry;
use crate::repositories::errors::queue_repository_errors::QueueRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Writes the entry, replacing any previous entry for the same player.
    async fn join_queue(&self, entry: &QueueEntry) -> Result<(), QueueRepositoryError>;

    /// Removes the player's entry. Removing an absent entry is a no-op.
    async fn leave_queue(&self, player_id: &str) -> Result<(), QueueRepositoryError>;

    async fn get_entry(&self, player_id: &str)
        -> Result<Option<QueueEntry>, QueueRepositoryError>;

    /// Entries with `min_rating <= rating <= max_rating`, excluding the
    /// requester's own entry.
    async fn find_in_window(
        &self,
        requester_id: &str,
        min_rating: i32,
        max_rating: i32,
    ) -> Result<Vec<QueueEntry>, QueueRepositoryError>;
}

pub struct DynamoDbQueueRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbQueueRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("MATCHMAKING_TABLE")
            .expect("MATCHMAKING_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl QueueRepository for DynamoDbQueueRepository {
    async fn join_queue(&self, entry: &QueueEntry) -> Result<(), QueueRepositoryError> {
        let item = to_item(entry).map_err(|e| QueueRepositoryError::Serialization(e.to_string()))?;

        // put_item overwrites by player_id, which is exactly the
        // replace-on-rejoin queue semantics.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| QueueRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn leave_queue(&self, player_id: &str) -> Result<(), QueueRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("player_id", AttributeValue::S(player_id.to_string()))
            .send()
            .await
            .map_err(|e| QueueRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_entry(
        &self,
        player_id: &str,
    ) -> Result<Option<QueueEntry>, QueueRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("player_id", AttributeValue::S(player_id.to_string()))
            .send()
            .await
            .map_err(|e| QueueRepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            let entry: QueueEntry =
                from_item(item).map_err(|e| QueueRepositoryError::Serialization(e.to_string()))?;
            Ok(Some(entry))
        } else {
            Ok(None)
        }
    }

    async fn find_in_window(
        &self,
        requester_id: &str,
        min_rating: i32,
        max_rating: i32,
    ) -> Result<Vec<QueueEntry>, QueueRepositoryError> {
        // The waiting pool is small, so a filtered scan is enough here.
        // Still paginated: the filter runs per page, so candidates past
        // the first page would otherwise be dropped.
        let mut entries = Vec::new();
        let mut exclusive_start_key = None;
        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("rating BETWEEN :min AND :max AND player_id <> :requester")
                .expression_attribute_values(":min", AttributeValue::N(min_rating.to_string()))
                .expression_attribute_values(":max", AttributeValue::N(max_rating.to_string()))
                .expression_attribute_values(
                    ":requester",
                    AttributeValue::S(requester_id.to_string()),
                )
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| QueueRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(items) = result.items {
                for item in items {
                    let entry: QueueEntry = from_item(item)
                        .map_err(|e| QueueRepositoryError::Serialization(e.to_string()))?;
                    entries.push(entry);
                }
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => return Ok(entries),
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory queue store with the same contract as the DynamoDB
    /// implementation, shared by the service tests.
    #[derive(Default)]
    pub struct InMemoryQueueRepository {
        pub entries: Mutex<HashMap<String, QueueEntry>>,
        pub fail_writes: Mutex<bool>,
    }

    impl InMemoryQueueRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entries(entries: Vec<QueueEntry>) -> Self {
            let repository = Self::new();
            {
                let mut map = repository.entries.lock().unwrap();
                for entry in entries {
                    map.insert(entry.player_id.clone(), entry);
                }
            }
            repository
        }

        pub fn contains(&self, player_id: &str) -> bool {
            self.entries.lock().unwrap().contains_key(player_id)
        }

        pub fn remove_entry(&self, player_id: &str) -> Option<QueueEntry> {
            self.entries.lock().unwrap().remove(player_id)
        }
    }

    #[async_trait]
    impl QueueRepository for InMemoryQueueRepository {
        async fn join_queue(&self, entry: &QueueEntry) -> Result<(), QueueRepositoryError> {
            if *self.fail_writes.lock().unwrap() {
                return Err(QueueRepositoryError::DynamoDb("write failure".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(entry.player_id.clone(), entry.clone());
            Ok(())
        }

        async fn leave_queue(&self, player_id: &str) -> Result<(), QueueRepositoryError> {
            if *self.fail_writes.lock().unwrap() {
                return Err(QueueRepositoryError::DynamoDb("write failure".to_string()));
            }
            self.entries.lock().unwrap().remove(player_id);
            Ok(())
        }

        async fn get_entry(
            &self,
            player_id: &str,
        ) -> Result<Option<QueueEntry>, QueueRepositoryError> {
            Ok(self.entries.lock().unwrap().get(player_id).cloned())
        }

        async fn find_in_window(
            &self,
            requester_id: &str,
            min_rating: i32,
            max_rating: i32,
        ) -> Result<Vec<QueueEntry>, QueueRepositoryError> {
            let entries = self
                .entries
                .lock()
                .unwrap()
                .values()
                .filter(|entry| entry.player_id != requester_id)
                .filter(|entry| entry.rating >= min_rating && entry.rating <= max_rating)
                .cloned()
                .collect();
            Ok(entries)
        }
    }

    #[tokio::test]
    async fn test_join_queue_replaces_existing_entry() {
        let repository = InMemoryQueueRepository::new();

        repository
            .join_queue(&QueueEntry::new("player1", 1200))
            .await
            .unwrap();
        repository
            .join_queue(&QueueEntry::new("player1", 1300))
            .await
            .unwrap();

        let entry = repository.get_entry("player1").await.unwrap().unwrap();
        assert_eq!(entry.rating, 1300);
        assert_eq!(repository.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_leave_queue_absent_entry_is_noop() {
        let repository = InMemoryQueueRepository::new();

        repository.leave_queue("nobody").await.unwrap();
    }

    #[tokio::test]
    async fn test_find_in_window_excludes_requester() {
        let repository = InMemoryQueueRepository::with_entries(vec![
            QueueEntry::new("requester", 1200),
            QueueEntry::new("candidate", 1200),
        ]);

        let candidates = repository
            .find_in_window("requester", 1100, 1300)
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].player_id, "candidate");
    }

    #[tokio::test]
    async fn test_find_in_window_bounds_are_inclusive() {
        let repository = InMemoryQueueRepository::with_entries(vec![
            QueueEntry::new("at-min", 1100),
            QueueEntry::new("at-max", 1300),
            QueueEntry::new("below", 1099),
            QueueEntry::new("above", 1301),
        ]);

        let mut candidates = repository
            .find_in_window("requester", 1100, 1300)
            .await
            .unwrap();
        candidates.sort_by(|a, b| a.player_id.cmp(&b.player_id));

        let ids: Vec<&str> = candidates.iter().map(|c| c.player_id.as_str()).collect();
        assert_eq!(ids, vec!["at-max", "at-min"]);
    }
}
