//! Frame-level transport seam over the raw socket.
//!
//! [`MessageTransport`] sits between the session logic and the wire: it
//! hands out inbound frames one at a time and performs the text and
//! close sends. The production implementation wraps an Axum
//! [`WebSocket`]; unit tests substitute a scripted transport.

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use bytes::Bytes;
use futures_util::StreamExt;

use crate::error::SessionError;

/// Transport-level message type of an inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// UTF-8 text payload.
    Text,
    /// Raw binary payload.
    Binary,
    /// Close handshake from the peer.
    Close,
}

/// One transport-level data unit pulled off the socket.
#[derive(Debug, Clone)]
pub struct InboundFrame {
    /// Message type carried by this frame.
    pub kind: FrameKind,
    /// Payload bytes (empty for close frames).
    pub payload: Bytes,
    /// Whether this frame completes the logical message.
    pub fin: bool,
}

/// Frame-oriented view of a bidirectional socket.
///
/// Transport-level ping/pong keepalives are handled below this interface
/// and never surface here.
#[allow(async_fn_in_trait)]
pub trait MessageTransport {
    /// Receives the next frame, or `None` once the peer is gone.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] on socket receive failures.
    async fn recv_frame(&mut self) -> Result<Option<InboundFrame>, SessionError>;

    /// Sends one complete final text frame.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] on socket send failures.
    async fn send_text(&mut self, text: &str) -> Result<(), SessionError>;

    /// Performs the close handshake with status "normal closure" (1000)
    /// and the given reason.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] on socket send failures.
    async fn close(&mut self, reason: &str) -> Result<(), SessionError>;
}

/// Production transport backed by an Axum [`WebSocket`].
pub struct WsTransport {
    socket: WebSocket,
}

impl WsTransport {
    /// Wraps an upgraded socket.
    #[must_use]
    pub fn new(socket: WebSocket) -> Self {
        Self { socket }
    }
}

impl std::fmt::Debug for WsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsTransport").finish_non_exhaustive()
    }
}

impl MessageTransport for WsTransport {
    async fn recv_frame(&mut self) -> Result<Option<InboundFrame>, SessionError> {
        loop {
            let Some(message) = self.socket.next().await else {
                return Ok(None);
            };
            // The protocol stack below Axum reassembles continuation
            // frames, so every data frame it yields is final.
            let frame = match message? {
                Message::Text(text) => InboundFrame {
                    kind: FrameKind::Text,
                    payload: Bytes::from(text),
                    fin: true,
                },
                Message::Binary(payload) => InboundFrame {
                    kind: FrameKind::Binary,
                    payload,
                    fin: true,
                },
                Message::Close(_) => InboundFrame {
                    kind: FrameKind::Close,
                    payload: Bytes::new(),
                    fin: true,
                },
                Message::Ping(_) | Message::Pong(_) => continue,
            };
            return Ok(Some(frame));
        }
    }

    async fn send_text(&mut self, text: &str) -> Result<(), SessionError> {
        self.socket.send(Message::text(text)).await?;
        Ok(())
    }

    async fn close(&mut self, reason: &str) -> Result<(), SessionError> {
        self.socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::NORMAL,
                reason: reason.into(),
            })))
            .await?;
        Ok(())
    }
}

/// Scripted transport for unit tests: plays back a fixed sequence of
/// inbound frames and records everything sent.
#[cfg(test)]
pub(crate) struct ScriptedTransport {
    pub(crate) inbound: std::collections::VecDeque<InboundFrame>,
    pub(crate) sent: Vec<String>,
    pub(crate) closed_with: Option<String>,
}

#[cfg(test)]
impl ScriptedTransport {
    pub(crate) fn new(inbound: Vec<InboundFrame>) -> Self {
        Self {
            inbound: inbound.into(),
            sent: Vec::new(),
            closed_with: None,
        }
    }

    pub(crate) fn text_frame(payload: &str, fin: bool) -> InboundFrame {
        InboundFrame {
            kind: FrameKind::Text,
            payload: Bytes::copy_from_slice(payload.as_bytes()),
            fin,
        }
    }

    pub(crate) fn binary_frame(payload: &'static [u8], fin: bool) -> InboundFrame {
        InboundFrame {
            kind: FrameKind::Binary,
            payload: Bytes::from_static(payload),
            fin,
        }
    }

    pub(crate) fn close_frame() -> InboundFrame {
        InboundFrame {
            kind: FrameKind::Close,
            payload: Bytes::new(),
            fin: true,
        }
    }
}

#[cfg(test)]
impl MessageTransport for ScriptedTransport {
    async fn recv_frame(&mut self) -> Result<Option<InboundFrame>, SessionError> {
        Ok(self.inbound.pop_front())
    }

    async fn send_text(&mut self, text: &str) -> Result<(), SessionError> {
        self.sent.push(text.to_string());
        Ok(())
    }

    async fn close(&mut self, reason: &str) -> Result<(), SessionError> {
        self.closed_with = Some(reason.to_string());
        Ok(())
    }
}
