use std::sync::Arc;

use tracing::debug;

use crate::models::queue::QueueEntry;
use crate::repositories::queue_repository::QueueRepository;
use crate::services::errors::queue_service_errors::QueueServiceError;

#[derive(Clone)]
pub struct QueueService {
    repository: Arc<dyn QueueRepository + Send + Sync>,
}

impl QueueService {
    pub fn new(repository: Arc<dyn QueueRepository + Send + Sync>) -> Self {
        QueueService { repository }
    }

    pub async fn join_queue(&self, player_id: &str, rating: i32) -> Result<(), QueueServiceError> {
        if player_id.is_empty() {
            return Err(QueueServiceError::ValidationError(
                "no player id provided".to_string(),
            ));
        }

        let entry = QueueEntry::new(player_id, rating);
        self.repository.join_queue(&entry).await?;

        debug!("Player {} joined queue with rating {}", player_id, rating);
        Ok(())
    }

    pub async fn leave_queue(&self, player_id: &str) -> Result<(), QueueServiceError> {
        if player_id.is_empty() {
            return Err(QueueServiceError::ValidationError(
                "no player id provided".to_string(),
            ));
        }

        self.repository.leave_queue(player_id).await?;

        debug!("Player {} left queue", player_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::queue_repository::tests::InMemoryQueueRepository;

    #[tokio::test]
    async fn test_join_queue_creates_entry() {
        let repository = Arc::new(InMemoryQueueRepository::new());
        let service = QueueService::new(repository.clone());

        service.join_queue("player1", 1200).await.unwrap();

        let entry = repository.get_entry("player1").await.unwrap().unwrap();
        assert_eq!(entry.rating, 1200);
    }

    #[tokio::test]
    async fn test_rejoin_replaces_entry() {
        let repository = Arc::new(InMemoryQueueRepository::new());
        let service = QueueService::new(repository.clone());

        service.join_queue("player1", 1200).await.unwrap();
        service.join_queue("player1", 1350).await.unwrap();

        let entry = repository.get_entry("player1").await.unwrap().unwrap();
        assert_eq!(entry.rating, 1350);
        assert_eq!(repository.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_join_queue_rejects_empty_id() {
        let service = QueueService::new(Arc::new(InMemoryQueueRepository::new()));

        let result = service.join_queue("", 1200).await;

        assert!(matches!(
            result,
            Err(QueueServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_leave_queue_removes_entry() {
        let repository = Arc::new(InMemoryQueueRepository::new());
        let service = QueueService::new(repository.clone());

        service.join_queue("player1", 1200).await.unwrap();
        service.leave_queue("player1").await.unwrap();

        assert!(!repository.contains("player1"));
    }

    #[tokio::test]
    async fn test_leave_queue_when_not_queued_is_ok() {
        let service = QueueService::new(Arc::new(InMemoryQueueRepository::new()));

        service.leave_queue("player1").await.unwrap();
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let repository = Arc::new(InMemoryQueueRepository::new());
        *repository.fail_writes.lock().unwrap() = true;
        let service = QueueService::new(repository);

        let result = service.join_queue("player1", 1200).await;

        assert!(matches!(
            result,
            Err(QueueServiceError::RepositoryError(_))
        ));
    }
}
