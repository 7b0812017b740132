//! Session runtime
//!
//! One task owns the conversation and applies events in channel order.
//! Front ends send events through a [`ChatHandle`] and observe snapshots
//! through a `watch` channel.

mod executor;


pub use executor::ChatRuntime;

use crate::chat::{ChatContext, Conversation, Event};
use crate::client::AskService;
use crate::config::ChatConfig;
use crate::message::{Message, Origin};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Snapshot published after every accepted event
#[derive(Debug, Clone)]
pub struct SessionView {
    pub conversation: Conversation,
    /// Bumped whenever the newest content should be scrolled into view
    pub scroll_generation: u64,
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct ChatHandle {
    event_tx: mpsc::Sender<Event>,
    view_rx: watch::Receiver<SessionView>,
    shutdown: CancellationToken,
}

impl ChatHandle {
    /// Queue an event. Returns false once the runtime has stopped.
    pub async fn send(&self, event: Event) -> bool {
        self.event_tx.send(event).await.is_ok()
    }

    /// Latest snapshot
    #[cfg(test)]
    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_rx.clone()
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Submit `text` and wait for the bot message that answers it.
    ///
    /// Returns `None` for blank text, while another exchange is pending, when
    /// another submission wins the turn, or when the runtime stops first.
    pub async fn ask(&self, text: &str) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }
        let mut rx = self.view_rx.clone();
        let before = {
            let view = rx.borrow_and_update();
            if view.conversation.is_awaiting_response() {
                return None;
            }
            view.conversation.messages().len()
        };

        if !self
            .send(Event::DraftChanged {
                text: text.to_string(),
            })
            .await
            || !self.send(Event::Submit).await
        {
            return None;
        }

        // The turn at `before` is ours only if our submission was accepted
        let is_ours = |m: &Message| m.origin() == Origin::User && m.text() == text;
        let view = rx
            .wait_for(|v| match v.conversation.messages().get(before) {
                None => false,
                Some(m) if !is_ours(m) => true,
                Some(_) => {
                    v.conversation.messages().len() >= before + 2
                        && !v.conversation.is_awaiting_response()
                }
            })
            .await
            .ok()?;

        let messages = view.conversation.messages();
        if !messages.get(before).is_some_and(is_ours) {
            tracing::debug!("Another submission took the turn");
            return None;
        }
        messages.get(before + 1).cloned()
    }
}

/// Start a session runtime on the current tokio runtime
pub fn spawn_session<C: AskService + 'static>(config: &ChatConfig, client: C) -> ChatHandle {
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let conversation = Conversation::new(config.greeting.clone());
    let (view_tx, view_rx) = watch::channel(SessionView {
        conversation: conversation.clone(),
        scroll_generation: 0,
    });
    let shutdown = CancellationToken::new();

    let runtime = ChatRuntime::new(
        ChatContext::new(config.fallback_text.clone()),
        conversation,
        client,
        config.exchange_timeout,
        event_rx,
        event_tx.clone(),
        view_tx,
        shutdown.clone(),
    );

    tokio::spawn(runtime.run());

    ChatHandle {
        event_tx,
        view_rx,
        shutdown,
    }
}
