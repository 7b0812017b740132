//! Conversation state holder

use crate::message::Message;
#[cfg(test)]
use crate::message::Origin;

pub const DEFAULT_GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";
pub const DEFAULT_FALLBACK: &str =
    "Sorry, I'm having trouble connecting right now. Please try again.";

/// Fixed per-session settings the transition function needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    /// Bot text appended when an exchange fails for any reason
    pub fallback_text: String,
}

impl ChatContext {
    pub fn new(fallback_text: impl Into<String>) -> Self {
        Self {
            fallback_text: fallback_text.into(),
        }
    }
}

impl Default for ChatContext {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK)
    }
}

/// Messages, draft text and the awaiting-response flag of one session.
///
/// The message list is append-only: nothing here removes or edits a message
/// once it has been pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
    draft: String,
    awaiting_response: bool,
}

impl Conversation {
    /// Start a session seeded with one bot greeting
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::bot(greeting)],
            draft: String::new(),
            awaiting_response: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// True when a submission would be accepted right now
    pub fn can_submit(&self) -> bool {
        !self.awaiting_response && !self.draft.trim().is_empty()
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Append a user turn, clear the draft and mark the session as awaiting.
    ///
    /// Returns `None` without touching anything when `text` is blank.
    pub fn append_user_message(&mut self, text: impl Into<String>) -> Option<&Message> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(Message::user(text));
        self.draft.clear();
        self.awaiting_response = true;
        self.messages.last()
    }

    /// Append a bot turn. Always clears the awaiting flag.
    pub fn append_bot_message(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::bot(text));
        self.awaiting_response = false;
        &self.messages[self.messages.len() - 1]
    }

    #[cfg(test)]
    pub fn count_by_origin(&self, origin: Origin) -> usize {
        self.messages.iter().filter(|m| m.origin() == origin).count()
    }

    #[cfg(test)]
    pub(crate) fn push_raw(&mut self, message: Message) {
        self.messages.push(message);
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}
