//! Session runtime executor

use super::SessionView;
use crate::chat::{transition, ChatContext, Conversation, Effect, Event};
use crate::client::{AskError, AskService};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;

/// Owns one conversation and executes the effects its transitions produce
pub struct ChatRuntime<C>
where
    C: AskService + 'static,
{
    context: ChatContext,
    conversation: Conversation,
    ask_client: Arc<C>,
    exchange_timeout: Duration,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    view_tx: watch::Sender<SessionView>,
    scroll_generation: u64,
    shutdown: CancellationToken,
    /// Task running the in-flight exchange, if any
    exchange: Option<JoinHandle<()>>,
}

impl<C> ChatRuntime<C>
where
    C: AskService + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: ChatContext,
        conversation: Conversation,
        ask_client: C,
        exchange_timeout: Duration,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::Sender<Event>,
        view_tx: watch::Sender<SessionView>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            context,
            conversation,
            ask_client: Arc::new(ask_client),
            exchange_timeout,
            event_rx,
            event_tx,
            view_tx,
            scroll_generation: 0,
            shutdown,
            exchange: None,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(endpoint = %self.ask_client.endpoint(), "Starting chat session");

        loop {
            tokio::select! {
                biased;

                () = self.shutdown.cancelled() => break,

                maybe_event = self.event_rx.recv() => match maybe_event {
                    Some(event) => self.process_event(event),
                    None => break,
                },
            }
        }

        if let Some(exchange) = self.exchange.take() {
            if !exchange.is_finished() {
                tracing::info!("Abandoning in-flight exchange");
                exchange.abort();
            }
        }

        tracing::info!(
            messages = self.conversation.messages().len(),
            "Chat session stopped"
        );
    }

    fn process_event(&mut self, event: Event) {
        match transition(&mut self.conversation, &self.context, event) {
            Ok(result) => {
                for effect in result.effects {
                    self.execute_effect(effect);
                }
                self.publish();
            }
            Err(e) => {
                // Blank or concurrent submissions are silent for the user
                tracing::debug!(reason = %e, "Event ignored");
            }
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SendQuery { query } => self.start_exchange(query),

            Effect::ScrollToLatest => {
                self.scroll_generation += 1;
            }

            Effect::ReportFailure { kind, message } => {
                tracing::error!(
                    kind = %kind,
                    error = %message,
                    "Exchange failed, showing fallback message"
                );
            }
        }
    }

    fn start_exchange(&mut self, query: String) {
        let client = self.ask_client.clone();
        let event_tx = self.event_tx.clone();
        let limit = self.exchange_timeout;

        tracing::debug!(query_chars = query.chars().count(), "Sending query");

        self.exchange = Some(tokio::spawn(async move {
            let event = resolve_exchange(client, query, limit).await;
            if event_tx.send(event).await.is_err() {
                tracing::debug!("Session closed before the exchange resolved");
            }
        }));
    }

    fn publish(&self) {
        self.view_tx.send_replace(SessionView {
            conversation: self.conversation.clone(),
            scroll_generation: self.scroll_generation,
        });
    }
}

/// Run one exchange to completion and turn every outcome into an event.
///
/// The call runs in its own task so a panic inside the service still
/// resolves to `ExchangeFailed` instead of leaving the session awaiting.
/// Dropping the returned future aborts that task too.
pub(crate) async fn resolve_exchange<C: AskService + 'static>(
    client: Arc<C>,
    query: String,
    limit: Duration,
) -> Event {
    let attempt = AbortOnDropHandle::new(tokio::spawn(async move {
        tokio::time::timeout(limit, client.ask(&query)).await
    }));

    let outcome = match attempt.await {
        Ok(Ok(result)) => result,
        Ok(Err(_elapsed)) => Err(AskError::timeout(limit)),
        Err(join_error) => Err(AskError::unknown(format!(
            "Exchange task failed: {join_error}"
        ))),
    };

    match outcome {
        Ok(answer) => Event::AnswerReceived { answer },
        Err(e) => Event::ExchangeFailed {
            kind: e.kind,
            message: e.message,
        },
    }
}
