use serde::{Deserialize, Serialize};

// === HTTP DTOs ===

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Accepted for API compatibility; does not affect the answer.
    pub user_id: String,
    pub input_text: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct ActivateResponse {
    pub message: String,
}

impl ActivateResponse {
    pub fn ready(user_id: &str) -> Self {
        Self {
            message: format!("Ready to handle traffic for User: {}", user_id),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
