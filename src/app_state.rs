//! Shared application state injected into all Axum handlers.

use tokio_util::sync::CancellationToken;

use crate::config::GatewayConfig;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gateway configuration loaded at startup.
    pub config: GatewayConfig,
    /// Root cancellation token; each WebSocket session derives a child
    /// token from it.
    pub shutdown: CancellationToken,
}
