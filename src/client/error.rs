//! Answer service error types

use std::time::Duration;
use thiserror::Error;

/// Failed exchange with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AskError {
    pub kind: AskErrorKind,
    pub message: String,
    /// HTTP status when the service answered with a non-success code
    pub status: Option<u16>,
}

impl AskError {
    pub fn new(kind: AskErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AskErrorKind::Network, message)
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            AskErrorKind::Timeout,
            format!("No answer within {}s", after.as_secs()),
        )
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            ..Self::new(AskErrorKind::Status, message)
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(AskErrorKind::Malformed, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AskErrorKind::Unknown, message)
    }
}

/// Error classification, only visible to operators through logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskErrorKind {
    /// Connection refused, reset, DNS failure
    Network,
    /// No answer within the exchange timeout
    Timeout,
    /// Non-success HTTP status
    Status,
    /// Body is not JSON or has no string `answer`
    Malformed,
    /// Anything else, including a crashed exchange task
    Unknown,
}

impl AskErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::Malformed => "malformed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AskErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
