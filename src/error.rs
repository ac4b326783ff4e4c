//! Session error types for the WebSocket command protocol.
//!
//! [`SessionError`] is the central error type for a WebSocket session.
//! Every variant is terminal: the session ends without retry, either by
//! closing the socket or abandoning it. "Peer left before sending
//! anything" is not an error and is represented as an absent message by
//! the receive path instead.

use std::string::FromUtf8Error;

/// Terminal failure of a single WebSocket session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The completed logical message was not a text message.
    #[error("unexpected message type")]
    UnexpectedMessageType,

    /// The reassembled payload was not valid UTF-8. No substitution or
    /// recovery is attempted.
    #[error("malformed text payload: {0}")]
    MalformedText(#[from] FromUtf8Error),

    /// The peer vanished in the middle of a fragmented message.
    #[error("connection interrupted mid-message")]
    Interrupted,

    /// The session's cancellation signal fired before the message
    /// completed.
    #[error("session cancelled")]
    Cancelled,

    /// Underlying socket I/O failure on receive or send.
    #[error("transport error: {0}")]
    Transport(#[from] axum::Error),
}

impl SessionError {
    /// Returns `true` for protocol violations (wrong message type or
    /// malformed text encoding), as opposed to transport or cancellation
    /// failures.
    #[must_use]
    pub const fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::UnexpectedMessageType | Self::MalformedText(_))
    }
}
