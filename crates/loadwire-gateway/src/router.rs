//! Axum router wiring.
//!
//! - `/v1/ws` upgrades to the event socket
//! - `/v1/events/*` ingests domain events
//! - `/healthz` liveness

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ingest, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/ws", get(transport::ws::ws_upgrade))
        .route("/v1/events/negotiation", post(ingest::negotiation))
        .route("/v1/events/bid", post(ingest::bid))
        .route("/v1/events/chat", post(ingest::chat))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}
