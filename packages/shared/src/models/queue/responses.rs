use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct QueueResponse {
    pub status: String,
}

impl QueueResponse {
    pub fn ok() -> Self {
        QueueResponse {
            status: "ok".to_string(),
        }
    }
}
