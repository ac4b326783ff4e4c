//! # charla-gateway
//!
//! WebSocket gateway that speaks a small Spanish-language text command
//! protocol. Each connection carries exactly one command: the gateway
//! reassembles it from transport frames, dispatches it against fixed
//! command tables, sends the replies, and releases the socket.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)        health + command catalog
//!     ├── WS Handler (ws/)            one command per connection
//!     │       ├── assembler           frames → logical message
//!     │       └── dispatch            command tables → replies/close
//!     │
//!     └── GatewayConfig (config/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod ws;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete application router: REST endpoints plus the
/// WebSocket endpoint at `/ws`.
#[must_use]
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
