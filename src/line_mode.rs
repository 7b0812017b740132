//! Non-interactive front end
//!
//! Used when stdin is not a terminal: every non-blank input line is one user
//! turn, and the bot message answering it is written to the output.

use crate::runtime::ChatHandle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub async fn run(handle: ChatHandle) -> std::io::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = run_with(&handle, stdin, tokio::io::stdout()).await;
    handle.shutdown();
    result
}

/// Feed `reader` line by line through the session, writing answers to `writer`
pub async fn run_with<R, W>(handle: &ChatHandle, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut turns = 0usize;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(answer) = handle.ask(&line).await else {
            tracing::warn!("Session stopped before answering, ending input");
            break;
        };
        writer.write_all(answer.text().as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        turns += 1;
    }

    tracing::info!(turns, "Input exhausted");
    Ok(())
}
