//! Codepad · Coding Workspace Backend
//!
//! - Axum HTTP API for the problem catalog, hints and code execution
//! - WebSocket workspace sessions (per-language drafts, split layout,
//!   editor layout sync), one session per connection
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                 : u16 (default 4000)
//!   PROBLEMS_PATH        : problem data JSON (default ./problems_db.json)
//!   CODEPAD_CONFIG_PATH  : path to TOML config (catalog, prompts, runner)
//!   OPENAI_API_KEY       : enables the hint assistant if present
//!   OPENAI_BASE_URL      : default "https://api.openai.com/v1"
//!   OPENAI_MODEL         : default "gpt-4o-mini"
//!   RUNNER_CLIENT_ID     : enables code execution (with RUNNER_CLIENT_SECRET)
//!   RUNNER_CLIENT_SECRET
//!   RUNNER_BASE_URL      : default "https://api.jdoodle.com/v1"
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod catalog;
mod config;
mod domain;
mod error;
mod logic;
mod markdown;
mod openai;
mod protocol;
mod routes;
mod runner;
mod seeds;
mod state;
mod telemetry;
mod util;
mod workspace;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared, read-only state: catalog, prompts, external clients.
  let state = Arc::new(AppState::new());

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 4000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "codepad_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "codepad_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "codepad_backend", "Shutdown signal received");
}
