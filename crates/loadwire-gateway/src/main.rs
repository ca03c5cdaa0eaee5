//! loadwire gateway
//!
//! - WebSocket endpoint: /v1/ws?user=...
//! - Event ingest: POST /v1/events/{negotiation,bid,chat}
//! - Heartbeat ping + idle timeout per session

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use loadwire_core::error::{LoadwireError, Result};
use loadwire_gateway::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "loadwire.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "loadwire-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("LOADWIRE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.gateway.listen.parse().map_err(|e| {
        LoadwireError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
    })?;

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "loadwire-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| LoadwireError::Internal(format!("failed to bind: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| LoadwireError::Internal(format!("server failed: {e}")))
}
