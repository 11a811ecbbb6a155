use crate::repositories::errors::rating_repository_errors::RatingRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

/// Read side of the external player-profile store. Rating writes go
/// through the settlement transaction in the game repository.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn get_rating(&self, player_id: &str) -> Result<f64, RatingRepositoryError>;
}

pub struct DynamoDbRatingRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbRatingRepository {
    pub fn new(client: Client) -> Self {
        let table_name =
            std::env::var("USERS_TABLE").expect("USERS_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl RatingRepository for DynamoDbRatingRepository {
    async fn get_rating(&self, player_id: &str) -> Result<f64, RatingRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(player_id.to_string()))
            .send()
            .await
            .map_err(|e| RatingRepositoryError::DynamoDb(e.to_string()))?;

        let item = result.item.ok_or(RatingRepositoryError::NotFound)?;

        item.get("elo_rating")
            .and_then(|value| value.as_n().ok())
            .and_then(|n| n.parse::<f64>().ok())
            .ok_or_else(|| {
                RatingRepositoryError::Serialization(format!(
                    "elo_rating missing or not numeric for player {}",
                    player_id
                ))
            })
    }
}
