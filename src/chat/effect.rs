//! Effects produced by state transitions

use crate::client::AskErrorKind;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the exchange with the answer service
    SendQuery { query: String },

    /// Bring the newest message (or the typing indicator) into view
    ScrollToLatest,

    /// Record a failed exchange for operators
    ReportFailure {
        kind: AskErrorKind,
        message: String,
    },
}

impl Effect {
    pub fn send_query(query: impl Into<String>) -> Self {
        Effect::SendQuery {
            query: query.into(),
        }
    }

    pub fn report_failure(kind: AskErrorKind, message: impl Into<String>) -> Self {
        Effect::ReportFailure {
            kind,
            message: message.into(),
        }
    }
}
