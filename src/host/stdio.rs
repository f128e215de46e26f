//! Stdin/stdout JSON bridge for the host command channel.
//!
//! Reads newline-delimited JSON `CommandEnvelope` messages from stdin,
//! dispatches them through the `HostCommandServer` router, and writes one
//! `ResponseEnvelope` per line to stdout.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use crate::error::{PreviewError, Result};
use crate::host::channel::{HostCommandClient, SearchBackend, command_channel};
use crate::host::contract::{CommandEnvelope, CommandName, ResponseEnvelope};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

/// Default request channel capacity for the stdio bridge.
const REQUEST_CAPACITY: usize = 64;

/// Run the stdin/stdout JSON bridge until stdin closes or a `runtime.stop`
/// command is received.
pub async fn run_stdio_bridge<B: SearchBackend>(backend: B) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    run_bridge(backend, reader, writer).await
}

/// Run the bridge over arbitrary line-oriented input and output.
///
/// The command router runs on its own task; the reader runs on the
/// current one so that when it finishes the client is dropped, which
/// closes the request channel and lets the router exit.
pub async fn run_bridge<B, R, W>(backend: B, reader: R, mut writer: W) -> Result<()>
where
    B: SearchBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (client, server) = command_channel(REQUEST_CAPACITY, backend);

    let server_handle = tokio::spawn(async move {
        server.run().await;
    });

    let reader_result = run_reader(client, reader, &mut writer).await;

    let _ = server_handle.await;

    reader_result
}

/// Read line-by-line, dispatch each command, and write responses.
async fn run_reader<R, W>(client: HostCommandClient, mut reader: R, writer: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| PreviewError::Host(format!("failed to read from stdin: {e}")))?;

        // EOF
        if bytes_read == 0 {
            tracing::info!("stdin closed (EOF); shutting down stdio bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: CommandEnvelope = match serde_json::from_str(trimmed) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse command envelope from stdin");
                let error_response = unparsed_envelope_response(trimmed, &e);
                write_response(writer, &error_response).await?;
                continue;
            }
        };

        let is_stop = envelope.command == CommandName::RuntimeStop;
        let request_id = envelope.request_id.clone();
        let command = envelope.command;

        let response = match client.send(envelope).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, command = command.as_str(), "host command failed");
                ResponseEnvelope::error(request_id, e.to_string())
            }
        };

        write_response(writer, &response).await?;

        if is_stop {
            tracing::info!("runtime.stop received; shutting down stdio bridge");
            break;
        }
    }

    Ok(())
}

/// Error response for a line that is not a valid command envelope.
///
/// When the line is JSON carrying a `request_id` (e.g. an unknown command),
/// the error is addressed to that id; otherwise to `parse-error`.
fn unparsed_envelope_response(line: &str, error: &serde_json::Error) -> ResponseEnvelope {
    let request_id = serde_json::from_str::<serde_json::Value>(line)
        .ok()
        .and_then(|value| {
            value
                .get("request_id")
                .and_then(serde_json::Value::as_str)
                .filter(|id| !id.trim().is_empty())
                .map(str::to_owned)
        });

    match request_id {
        Some(id) => ResponseEnvelope::error(id, format!("unsupported command envelope: {error}")),
        None => ResponseEnvelope::error(
            "parse-error",
            format!("failed to parse command envelope: {error}"),
        ),
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &ResponseEnvelope,
) -> Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| PreviewError::Host(format!("failed to serialize response envelope: {e}")))?;
    write_line(writer, &json).await
}

/// Write a single JSON line and flush.
async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> Result<()> {
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| PreviewError::Host(format!("failed to write to stdout: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| PreviewError::Host(format!("failed to write newline to stdout: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| PreviewError::Host(format!("failed to flush stdout: {e}")))?;
    Ok(())
}
