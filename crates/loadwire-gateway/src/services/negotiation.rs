use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use loadwire_core::protocol::payload::format_timestamp;
use loadwire_core::protocol::{Domain, EventPayload, NegotiationMessage, SenderRole};

use crate::dispatch::EventDispatcher;

use super::de_id;

/// Raw negotiation record as handed over by the caller. Unknown keys
/// (including any caller-side `timestamp`) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationInput {
    #[serde(deserialize_with = "de_id")]
    pub bid_id: String,
    #[serde(deserialize_with = "de_id")]
    pub load_id: String,
    #[serde(deserialize_with = "de_id")]
    pub sender_id: String,
    pub sender_name: String,
    #[serde(default)]
    pub sender: Option<SenderRole>,
    pub message: String,
    #[serde(default)]
    pub rate: Value,
    #[serde(default)]
    pub sender_avatar: Option<String>,
    #[serde(default)]
    pub negotiation_data: Option<Value>,
}

pub fn build(input: NegotiationInput, now: DateTime<Utc>) -> NegotiationMessage {
    NegotiationMessage {
        bid_id: input.bid_id,
        load_id: input.load_id,
        sender_id: input.sender_id,
        sender_name: input.sender_name,
        sender: input.sender.unwrap_or_default(),
        message: input.message,
        rate: input.rate,
        timestamp: format_timestamp(now),
        sender_avatar: input.sender_avatar,
        negotiation_data: input.negotiation_data,
    }
}

/// Build and broadcast under every negotiation alias.
pub fn emit(dispatcher: &dyn EventDispatcher, input: NegotiationInput) -> EventPayload {
    let payload = EventPayload::from(build(input, Utc::now()));
    dispatcher.dispatch(Domain::Negotiation.aliases(), &payload, None);
    payload
}
