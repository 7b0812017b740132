//! HTTP answer service over reqwest

use super::types::{AskRequest, AskResponse, ErrorDetail};
use super::{AskError, AskErrorKind, AskService};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts queries to a fixed `/ask` endpoint
pub struct HttpAskClient {
    client: Client,
    endpoint: String,
}

impl HttpAskClient {
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self, AskError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
            .timeout(request_timeout)
            .build()
            .map_err(|e| AskError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn classify_send_error(e: &reqwest::Error) -> AskError {
        if e.is_timeout() {
            AskError::new(AskErrorKind::Timeout, format!("Request timeout: {e}"))
        } else if e.is_connect() {
            AskError::network(format!("Connection failed: {e}"))
        } else if e.is_request() {
            AskError::network(format!("Request failed: {e}"))
        } else {
            AskError::unknown(format!("Request failed: {e}"))
        }
    }
}

#[async_trait]
impl AskService for HttpAskClient {
    async fn ask(&self, query: &str) -> Result<String, AskError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&AskRequest { query })
            .send()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::classify_send_error(&e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorDetail>(&body) {
                Ok(detail) => format!("HTTP {status}: {}", detail.text()),
                Err(_) => format!("HTTP {status}: {body}"),
            };
            return Err(AskError::status(status.as_u16(), message));
        }

        let parsed: AskResponse = serde_json::from_str(&body).map_err(|e| {
            AskError::malformed(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Ok(parsed.answer)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
