//! Line-delimited JSON-RPC over stdin/stdout. Stdout carries protocol frames
//! only; logging goes to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::rpc;
use crate::AppState;

pub async fn run(state: AppState) -> anyhow::Result<()> {
    tracing::info!("Serving JSON-RPC on stdio");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(&state, stdin, stdout).await
}

/// Read frames until EOF, writing one response line per request.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = rpc::handle_text(state, line).await {
            let mut frame = serde_json::to_string(&response)?;
            frame.push('\n');
            writer.write_all(frame.as_bytes()).await?;
            writer.flush().await?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
