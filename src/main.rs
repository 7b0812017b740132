//! askbot - terminal chat client for a question answering service
//!
//! Forwards each user turn to `POST /ask` and renders the answer as a bot
//! message.

mod chat;
mod client;
mod config;
mod line_mode;
mod message;
mod runtime;
mod tui;

use client::{HttpAskClient, LoggingService};
use config::ChatConfig;
use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration
    let config = ChatConfig::from_env()?;

    // Initialize logging. The terminal belongs to the UI, so logs go to a file.
    let log_file = open_log_file(&config.log_path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askbot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    tracing::info!(
        endpoint = %config.endpoint,
        timeout_secs = config.exchange_timeout.as_secs(),
        "Starting askbot"
    );

    let http = HttpAskClient::new(config.endpoint.clone(), config.exchange_timeout)?;
    let client = LoggingService::new(Arc::new(http));
    let handle = runtime::spawn_session(&config, client);

    if std::io::stdin().is_terminal() {
        tui::run(handle).await?;
    } else {
        line_mode::run(handle).await?;
    }

    tracing::info!("askbot exiting");
    Ok(())
}

/// Open the log file for appending, creating its directory if needed
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
