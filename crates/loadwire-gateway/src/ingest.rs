//! HTTP ingest: the boundary where the business-logic layer raises events.
//!
//! - `POST /v1/events/negotiation`
//! - `POST /v1/events/bid`
//! - `POST /v1/events/chat`
//!
//! The body is the raw record for the domain's builder. A well-formed record is
//! accepted (202) whether or not anyone is connected; delivery is
//! fire-and-forget. Bodies are parsed here rather than by the `Json`
//! extractor so every malformed body gets the JSON error shape, whatever
//! its content type.

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use loadwire_core::protocol::{Domain, EventPayload};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::services::{BidInput, ChatInput, NegotiationInput};

fn accepted(domain: Domain, emitted: Option<EventPayload>) -> impl IntoResponse {
    (
        StatusCode::ACCEPTED,
        Json(json!({
            "accepted": true,
            "dispatched": emitted.is_some(),
            "events": domain.aliases(),
        })),
    )
}

pub async fn negotiation(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: NegotiationInput = serde_json::from_slice(&body)?;
    tracing::debug!(bid = %input.bid_id, load = %input.load_id, "negotiation event");
    Ok(accepted(Domain::Negotiation, app.notifier().negotiation_message(input)))
}

pub async fn bid(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: BidInput = serde_json::from_slice(&body)?;
    tracing::debug!(bid = %input.bid_id, load = %input.load_id, "bid event");
    Ok(accepted(Domain::Bid, app.notifier().bid_update(input)))
}

pub async fn chat(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: ChatInput = serde_json::from_slice(&body)?;
    tracing::debug!(receiver = %input.receiver_id, "chat event");
    Ok(accepted(Domain::Chat, app.notifier().chat_message(input)))
}
