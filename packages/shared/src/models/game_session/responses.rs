use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EndGameResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EndGameResponse {
    pub fn ok() -> Self {
        EndGameResponse {
            status: "ok".to_string(),
            message: None,
        }
    }
}
