//! REST API layer: route handlers and router composition.
//!
//! Only system endpoints live here; the command protocol itself runs
//! over the WebSocket endpoint.

pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new().merge(handlers::system::routes())
}
