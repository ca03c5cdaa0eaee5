use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use loadwire_core::protocol::payload::format_timestamp;
use loadwire_core::protocol::{BidUpdate, Domain, EventPayload};

use crate::dispatch::EventDispatcher;

use super::de_id;

const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidInput {
    #[serde(deserialize_with = "de_id")]
    pub bid_id: String,
    #[serde(deserialize_with = "de_id")]
    pub load_id: String,
    #[serde(deserialize_with = "de_id")]
    pub sender_id: String,
    pub sender_name: String,
    #[serde(default)]
    pub driver_name: Option<String>,
    pub message: String,
    #[serde(default)]
    pub rate: Value,
    #[serde(default)]
    pub status: Option<String>,
}

pub fn build(input: BidInput, now: DateTime<Utc>) -> BidUpdate {
    BidUpdate {
        bid_id: input.bid_id,
        load_id: input.load_id,
        sender_id: input.sender_id,
        sender_name: input.sender_name,
        driver_name: input.driver_name,
        message: input.message,
        rate: input.rate,
        status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        timestamp: format_timestamp(now),
    }
}

/// Build and broadcast under every bid alias.
pub fn emit(dispatcher: &dyn EventDispatcher, input: BidInput) -> EventPayload {
    let payload = EventPayload::from(build(input, Utc::now()));
    dispatcher.dispatch(Domain::Bid.aliases(), &payload, None);
    payload
}
