//! charla-gateway server entry point.
//!
//! Starts the Axum HTTP server with the REST and WebSocket endpoints.

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use charla_gateway::app_state::AppState;
use charla_gateway::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting charla-gateway");

    // Root cancellation token; every session derives a child from it, so
    // cancelling here aborts in-flight receive loops.
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown signal received");
                shutdown.cancel();
            }
        });
    }

    let listen_addr = config.listen_addr;
    let app = charla_gateway::build_app(AppState {
        config,
        shutdown: shutdown.clone(),
    });

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
