//! Command dispatch for decoded messages.
//!
//! A message is evaluated twice: once as a whole keyword against the
//! simple table, and once as `keyword#argument` against the
//! parameterized table when a delimiter is present. Both passes run
//! unconditionally for every message, so a delimited command such as
//! `hola#ana` also draws the simple pass's fallback reply before the
//! parameterized greeting. That double reply is wire-visible behavior
//! and is kept as is; see `DESIGN.md`.

use super::transport::MessageTransport;
use crate::error::SessionError;

/// Reply to a bare `hola`.
pub const GREETING_REPLY: &str = "Hola como estás, bienvenido";

/// Close reason sent for `adios`.
pub const FAREWELL_REASON: &str = "Desconectado";

/// Reply for anything the gateway does not understand.
pub const UNKNOWN_REPLY: &str = "Lo siento, pero no entiendo ese mensaje";

/// Reply prefix for a parameterized `hola#<name>`.
const USER_GREETING_PREFIX: &str = "Hola usuario ";

/// Separator between a command keyword and its argument.
const ARGUMENT_DELIMITER: char = '#';

/// One wire-level side effect produced by dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one complete final text frame.
    Reply(String),
    /// Close the session with status "normal closure".
    Close {
        /// Human-readable close reason.
        reason: &'static str,
    },
}

/// Evaluates one decoded message against both command tables.
///
/// Matching is case-insensitive: the message is lowercased once and both
/// passes work on the lowercased form, so the argument of a
/// parameterized command is echoed lowercased.
#[must_use]
pub fn evaluate(message: &str) -> Vec<Effect> {
    let lowered = message.to_lowercase();
    let mut effects = Vec::with_capacity(2);

    // Pass 1: the whole message against the simple table.
    match lowered.as_str() {
        "hola" => effects.push(Effect::Reply(GREETING_REPLY.to_string())),
        "adios" => effects.push(Effect::Close {
            reason: FAREWELL_REASON,
        }),
        _ => effects.push(Effect::Reply(UNKNOWN_REPLY.to_string())),
    }

    // Pass 2: keyword#argument, split on the first delimiter only. The
    // argument keeps any further delimiters.
    if let Some((keyword, argument)) = lowered.split_once(ARGUMENT_DELIMITER) {
        match keyword {
            "hola" => effects.push(Effect::Reply(format!("{USER_GREETING_PREFIX}{argument}"))),
            _ => effects.push(Effect::Reply(UNKNOWN_REPLY.to_string())),
        }
    }

    effects
}

/// Applies the effects for one message to the transport, in order.
///
/// Each reply goes out as one complete final text frame. A close effect
/// performs the normal-closure handshake and stops the loop; nothing
/// further is sent on the session after that.
///
/// # Errors
///
/// Propagates [`SessionError::Transport`] from the underlying sends.
pub async fn dispatch<T: MessageTransport>(
    transport: &mut T,
    message: &str,
) -> Result<(), SessionError> {
    for effect in evaluate(message) {
        match effect {
            Effect::Reply(text) => transport.send_text(&text).await?,
            Effect::Close { reason } => {
                transport.close(reason).await?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ws::transport::ScriptedTransport;
    use tokio_test::assert_ok;

    #[test]
    fn unknown_text_gets_single_fallback() {
        let effects = evaluate("que tal");
        assert_eq!(effects, vec![Effect::Reply(UNKNOWN_REPLY.to_string())]);
    }

    #[test]
    fn empty_message_gets_single_fallback() {
        let effects = evaluate("");
        assert_eq!(effects, vec![Effect::Reply(UNKNOWN_REPLY.to_string())]);
    }

    #[test]
    fn greeting_matches_any_case() {
        for message in ["hola", "Hola", "HOLA"] {
            let effects = evaluate(message);
            assert_eq!(effects, vec![Effect::Reply(GREETING_REPLY.to_string())]);
        }
    }

    #[test]
    fn farewell_closes_with_reason() {
        let effects = evaluate("ADIOS");
        assert_eq!(
            effects,
            vec![Effect::Close {
                reason: FAREWELL_REASON
            }]
        );
    }

    #[test]
    fn parameterized_greeting_also_draws_fallback() {
        let effects = evaluate("hola#Maria");
        assert_eq!(
            effects,
            vec![
                Effect::Reply(UNKNOWN_REPLY.to_string()),
                Effect::Reply("Hola usuario maria".to_string()),
            ]
        );
    }

    #[test]
    fn argument_splits_on_first_delimiter_only() {
        let effects = evaluate("hola#y#z");
        assert_eq!(
            effects,
            vec![
                Effect::Reply(UNKNOWN_REPLY.to_string()),
                Effect::Reply("Hola usuario y#z".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_parameterized_keyword_gets_two_fallbacks() {
        let effects = evaluate("x#y#z");
        assert_eq!(
            effects,
            vec![
                Effect::Reply(UNKNOWN_REPLY.to_string()),
                Effect::Reply(UNKNOWN_REPLY.to_string()),
            ]
        );
    }

    #[test]
    fn farewell_with_argument_does_not_close() {
        let effects = evaluate("adios#ya");
        assert_eq!(
            effects,
            vec![
                Effect::Reply(UNKNOWN_REPLY.to_string()),
                Effect::Reply(UNKNOWN_REPLY.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn dispatch_sends_greeting() {
        let mut transport = ScriptedTransport::new(Vec::new());
        assert_ok!(dispatch(&mut transport, "hola").await);

        assert_eq!(transport.sent, vec![GREETING_REPLY.to_string()]);
        assert!(transport.closed_with.is_none());
    }

    #[tokio::test]
    async fn dispatch_closes_on_farewell_without_text_reply() {
        let mut transport = ScriptedTransport::new(Vec::new());
        assert_ok!(dispatch(&mut transport, "adios").await);

        assert!(transport.sent.is_empty());
        assert_eq!(transport.closed_with.as_deref(), Some(FAREWELL_REASON));
    }

    #[tokio::test]
    async fn dispatch_sends_both_replies_in_order() {
        let mut transport = ScriptedTransport::new(Vec::new());
        assert_ok!(dispatch(&mut transport, "hola#Maria").await);

        assert_eq!(
            transport.sent,
            vec![
                UNKNOWN_REPLY.to_string(),
                "Hola usuario maria".to_string()
            ]
        );
        assert!(transport.closed_with.is_none());
    }
}
