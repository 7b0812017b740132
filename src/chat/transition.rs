//! State transition function
//!
//! Applies one event to the conversation through its mutation interface and
//! returns the effects to run. No I/O happens here. A rejected event leaves
//! the conversation untouched.

use super::{ChatContext, Conversation, Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TransitionResult {
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Draft is empty, nothing to send")]
    EmptyDraft,
    #[error("An answer is still pending")]
    AwaitingResponse,
    #[error("No exchange in flight, dropping stale resolution")]
    NotAwaiting,
}

pub fn transition(
    conversation: &mut Conversation,
    context: &ChatContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // ============================================================
        // Draft editing
        // ============================================================
        Event::DraftChanged { text } => {
            conversation.set_draft_text(text);
            Ok(TransitionResult::new())
        }

        Event::DraftEdited(edit) => {
            let text = edit.apply(conversation.draft());
            conversation.set_draft_text(text);
            Ok(TransitionResult::new())
        }

        // ============================================================
        // Submission
        // ============================================================
        Event::Submit => {
            if conversation.is_awaiting_response() {
                return Err(TransitionError::AwaitingResponse);
            }
            // Snapshot before the append clears the draft
            let query = conversation.draft().to_string();
            if conversation.append_user_message(query.clone()).is_none() {
                return Err(TransitionError::EmptyDraft);
            }
            Ok(TransitionResult::new()
                .with_effect(Effect::ScrollToLatest)
                .with_effect(Effect::send_query(query)))
        }

        // ============================================================
        // Exchange resolution
        // ============================================================
        Event::AnswerReceived { answer } => {
            if !conversation.is_awaiting_response() {
                return Err(TransitionError::NotAwaiting);
            }
            conversation.append_bot_message(answer);
            Ok(TransitionResult::new().with_effect(Effect::ScrollToLatest))
        }

        Event::ExchangeFailed { kind, message } => {
            if !conversation.is_awaiting_response() {
                return Err(TransitionError::NotAwaiting);
            }
            conversation.append_bot_message(context.fallback_text.clone());
            Ok(TransitionResult::new()
                .with_effect(Effect::report_failure(kind, message))
                .with_effect(Effect::ScrollToLatest))
        }
    }
}
