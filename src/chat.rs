//! Conversation state machine
//!
//! Elm-style: the transition function applies an event to the conversation
//! and returns the effects the runtime must execute. It performs no I/O.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{DraftEdit, Event};
pub use state::{ChatContext, Conversation};
pub use transition::{transition, TransitionError, TransitionResult};
