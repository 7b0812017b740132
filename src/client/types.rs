//! Wire types for the `/ask` endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub query: &'a str,
}

/// Success body. The service may echo other fields (e.g. `question`).
#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Error body in the FastAPI shape, `{"detail": ...}`
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub detail: Value,
}

impl ErrorDetail {
    /// Detail as display text. Validation errors arrive as a JSON list.
    pub fn text(&self) -> String {
        match &self.detail {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
