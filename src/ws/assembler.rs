//! Logical-message reassembly from transport frames.
//!
//! A logical message may arrive split across several frames; the
//! assembler accumulates payload bytes until the final fragment, checks
//! the message type, and decodes the result as strict UTF-8.

use bytes::BytesMut;
use tokio_util::sync::CancellationToken;

use super::transport::{FrameKind, MessageTransport};
use crate::error::SessionError;

/// Initial capacity of the accumulation buffer, matching the transport
/// read chunk size.
const ACCUMULATOR_CAPACITY: usize = 8 * 1024;

/// Reads exactly one complete text message from the transport.
///
/// Returns `Ok(None)` when the peer goes away before any payload frame
/// arrives (close frame or plain disconnect); the caller must skip
/// dispatch entirely. The cancellation token is checked before every
/// receive and aborts the read loop between frames.
///
/// # Errors
///
/// - [`SessionError::Cancelled`] if the token fires before the message
///   completes.
/// - [`SessionError::UnexpectedMessageType`] if the completed message is
///   not text.
/// - [`SessionError::MalformedText`] if the payload is not valid UTF-8.
/// - [`SessionError::Interrupted`] if the peer vanishes mid-message.
/// - [`SessionError::Transport`] on socket receive failures.
pub async fn receive_text_message<T: MessageTransport>(
    transport: &mut T,
    cancel: &CancellationToken,
) -> Result<Option<String>, SessionError> {
    let mut payload = BytesMut::with_capacity(ACCUMULATOR_CAPACITY);
    let mut kind = None;

    loop {
        if cancel.is_cancelled() {
            return Err(SessionError::Cancelled);
        }

        let Some(frame) = transport.recv_frame().await? else {
            if kind.is_none() {
                return Ok(None);
            }
            return Err(SessionError::Interrupted);
        };

        if frame.kind == FrameKind::Close {
            if kind.is_none() {
                return Ok(None);
            }
            return Err(SessionError::Interrupted);
        }

        // The first data frame fixes the message type; continuations
        // only contribute payload.
        kind.get_or_insert(frame.kind);
        payload.extend_from_slice(&frame.payload);

        if frame.fin {
            break;
        }
    }

    // The message type is judged once the logical message is complete.
    if kind != Some(FrameKind::Text) {
        return Err(SessionError::UnexpectedMessageType);
    }

    let text = String::from_utf8(payload.to_vec())?;
    Ok(Some(text))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ws::transport::{InboundFrame, ScriptedTransport};
    use tokio_test::assert_ok;
    use bytes::Bytes;

    #[tokio::test]
    async fn single_frame_message_decodes() {
        let mut transport =
            ScriptedTransport::new(vec![ScriptedTransport::text_frame("hola", true)]);
        let cancel = CancellationToken::new();

        let message = assert_ok!(receive_text_message(&mut transport, &cancel).await);
        assert_eq!(message.as_deref(), Some("hola"));
    }

    #[tokio::test]
    async fn fragmented_message_is_reassembled() {
        let mut transport = ScriptedTransport::new(vec![
            ScriptedTransport::text_frame("ho", false),
            ScriptedTransport::text_frame("la#", false),
            ScriptedTransport::text_frame("ana", true),
        ]);
        let cancel = CancellationToken::new();

        let message = assert_ok!(receive_text_message(&mut transport, &cancel).await);
        assert_eq!(message.as_deref(), Some("hola#ana"));
    }

    #[tokio::test]
    async fn empty_text_message_is_not_no_message() {
        let mut transport = ScriptedTransport::new(vec![ScriptedTransport::text_frame("", true)]);
        let cancel = CancellationToken::new();

        let message = assert_ok!(receive_text_message(&mut transport, &cancel).await);
        assert_eq!(message.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn binary_message_is_rejected() {
        let mut transport =
            ScriptedTransport::new(vec![ScriptedTransport::binary_frame(b"\x00\x01", true)]);
        let cancel = CancellationToken::new();

        let Err(err) = receive_text_message(&mut transport, &cancel).await else {
            panic!("binary message must not decode");
        };
        assert!(matches!(err, SessionError::UnexpectedMessageType));
    }

    #[tokio::test]
    async fn malformed_utf8_is_rejected() {
        let frame = InboundFrame {
            kind: FrameKind::Text,
            payload: Bytes::from_static(&[0xff, 0xfe, 0xfd]),
            fin: true,
        };
        let mut transport = ScriptedTransport::new(vec![frame]);
        let cancel = CancellationToken::new();

        let Err(err) = receive_text_message(&mut transport, &cancel).await else {
            panic!("malformed utf-8 must not decode");
        };
        assert!(matches!(err, SessionError::MalformedText(_)));
    }

    #[tokio::test]
    async fn close_before_payload_is_no_message() {
        let mut transport = ScriptedTransport::new(vec![ScriptedTransport::close_frame()]);
        let cancel = CancellationToken::new();

        let message = assert_ok!(receive_text_message(&mut transport, &cancel).await);
        assert!(message.is_none());
    }

    #[tokio::test]
    async fn disconnect_before_payload_is_no_message() {
        let mut transport = ScriptedTransport::new(Vec::new());
        let cancel = CancellationToken::new();

        let message = assert_ok!(receive_text_message(&mut transport, &cancel).await);
        assert!(message.is_none());
    }

    #[tokio::test]
    async fn disconnect_mid_message_is_interrupted() {
        let mut transport =
            ScriptedTransport::new(vec![ScriptedTransport::text_frame("hol", false)]);
        let cancel = CancellationToken::new();

        let Err(err) = receive_text_message(&mut transport, &cancel).await else {
            panic!("truncated message must not decode");
        };
        assert!(matches!(err, SessionError::Interrupted));
    }

    #[tokio::test]
    async fn close_mid_message_is_interrupted() {
        let mut transport = ScriptedTransport::new(vec![
            ScriptedTransport::text_frame("hol", false),
            ScriptedTransport::close_frame(),
        ]);
        let cancel = CancellationToken::new();

        let Err(err) = receive_text_message(&mut transport, &cancel).await else {
            panic!("truncated message must not decode");
        };
        assert!(matches!(err, SessionError::Interrupted));
    }

    #[tokio::test]
    async fn cancellation_aborts_before_receive() {
        let mut transport =
            ScriptedTransport::new(vec![ScriptedTransport::text_frame("hola", true)]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let Err(err) = receive_text_message(&mut transport, &cancel).await else {
            panic!("cancelled session must not yield a message");
        };
        assert!(matches!(err, SessionError::Cancelled));
        // The frame was never consumed: cancellation fires before the read.
        assert_eq!(transport.inbound.len(), 1);
    }
}
