//! Chat message records

use chrono::{DateTime, Local};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Bot,
}

impl Origin {
    /// Label shown above the bubble
    pub fn label(self) -> &'static str {
        match self {
            Origin::User => "You",
            Origin::Bot => "Assistant",
        }
    }
}

/// One turn of the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: String,
    text: String,
    origin: Origin,
    created_at: DateTime<Local>,
}

impl Message {
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self::with_timestamp(origin, text, Local::now())
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Origin::Bot, text)
    }

    /// Build a message with an explicit creation time.
    ///
    /// The id is always fresh; the timestamp never affects list order.
    pub fn with_timestamp(
        origin: Origin,
        text: impl Into<String>,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            origin,
            created_at,
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_bot(&self) -> bool {
        self.origin == Origin::Bot
    }

    /// Localized hour:minute for display
    pub fn display_time(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}
