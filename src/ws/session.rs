//! Per-connection session: one message in, replies out, socket
//! released.
//!
//! A session is strictly sequential: frame assembly, then dispatch, then
//! replies, then close. Every failure is terminal; nothing is retried.

use axum::extract::ws::WebSocket;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::assembler;
use super::dispatch;
use super::transport::WsTransport;

/// Runs one WebSocket session to completion.
///
/// Reads a single logical message, dispatches it, and returns; the
/// socket is released when this future resolves.
pub async fn run_session(socket: WebSocket, cancel: CancellationToken) {
    let session_id = Uuid::new_v4();
    let mut transport = WsTransport::new(socket);

    match assembler::receive_text_message(&mut transport, &cancel).await {
        Ok(Some(message)) => {
            tracing::debug!(%session_id, bytes = message.len(), "message received");
            if let Err(err) = dispatch::dispatch(&mut transport, &message).await {
                tracing::warn!(%session_id, error = %err, "send failed, abandoning session");
            }
        }
        Ok(None) => {
            tracing::debug!(%session_id, "peer left before sending a message");
        }
        Err(err) if err.is_protocol_violation() => {
            tracing::warn!(%session_id, error = %err, "protocol violation, aborting session");
        }
        Err(err) => {
            tracing::debug!(%session_id, error = %err, "session ended");
        }
    }
}
