//! Answer service client
//!
//! One request per user turn: the draft goes out as `{"query": ...}` and the
//! `answer` field of the reply comes back.

mod error;
mod http;
mod types;

pub use error::{AskError, AskErrorKind};
pub use http::HttpAskClient;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for answer services
#[async_trait]
pub trait AskService: Send + Sync {
    /// Ask one question, returning the answer text
    async fn ask(&self, query: &str) -> Result<String, AskError>;

    /// Where requests go, for logs
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: AskService + ?Sized> AskService for Arc<T> {
    async fn ask(&self, query: &str) -> Result<String, AskError> {
        (**self).ask(query).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for answer services
pub struct LoggingService {
    inner: Arc<dyn AskService>,
    endpoint: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn AskService>) -> Self {
        let endpoint = inner.endpoint().to_string();
        Self { inner, endpoint }
    }
}

#[async_trait]
impl AskService for LoggingService {
    async fn ask(&self, query: &str) -> Result<String, AskError> {
        let start = std::time::Instant::now();
        let result = self.inner.ask(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    query_chars = query.chars().count(),
                    answer_chars = answer.chars().count(),
                    "Answer received"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    duration_ms = %duration.as_millis(),
                    kind = %e.kind,
                    status = ?e.status,
                    error = %e.message,
                    "Ask request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
