//! WebSocket layer: upgrade handling, message reassembly, and command
//! dispatch.
//!
//! The WebSocket endpoint at `/ws` serves exactly one text command per
//! connection: the session reads one logical message, answers it, and
//! releases the socket.

pub mod assembler;
pub mod dispatch;
pub mod handler;
pub mod session;
pub mod transport;
