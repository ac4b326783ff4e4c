//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::session::run_session;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// Non-upgrade requests never reach this handler; the router serves them
/// through the REST surface, and a plain request to `/ws` receives the
/// standard upgrade rejection.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let cancel = state.shutdown.child_token();

    ws.max_message_size(state.config.max_message_bytes)
        .max_frame_size(state.config.max_frame_bytes)
        .on_upgrade(move |socket| run_session(socket, cancel))
}
