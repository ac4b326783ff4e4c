//! System endpoints: health check and command catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Supported WebSocket command info.
#[derive(Debug, Serialize, ToSchema)]
struct CommandInfo {
    keyword: &'static str,
    takes_argument: bool,
    closes_session: bool,
    description: &'static str,
}

/// `GET /config/commands` — List supported WebSocket commands.
#[utoipa::path(
    get,
    path = "/config/commands",
    tag = "System",
    summary = "List supported WebSocket commands",
    description = "Returns metadata for every command the WebSocket endpoint understands. Anything else draws the fallback reply.",
    responses(
        (status = 200, description = "Command catalog", body = Vec<CommandInfo>),
    )
)]
pub async fn commands_handler() -> impl IntoResponse {
    let commands = vec![
        CommandInfo {
            keyword: "hola",
            takes_argument: false,
            closes_session: false,
            description: "Greets the caller",
        },
        CommandInfo {
            keyword: "hola",
            takes_argument: true,
            closes_session: false,
            description: "Greets the user named after the # delimiter",
        },
        CommandInfo {
            keyword: "adios",
            takes_argument: false,
            closes_session: true,
            description: "Says goodbye and closes the connection",
        },
    ];
    (StatusCode::OK, Json(commands))
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/commands", get(commands_handler))
}
