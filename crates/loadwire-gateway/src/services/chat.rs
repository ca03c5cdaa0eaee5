use chrono::{DateTime, Utc};
use serde::Deserialize;

use loadwire_core::protocol::payload::format_timestamp;
use loadwire_core::protocol::{ChatMessage, Domain, EventPayload};

use crate::dispatch::EventDispatcher;

use super::de_id;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInput {
    #[serde(deserialize_with = "de_id")]
    pub sender_id: String,
    pub sender_name: String,
    /// Addressing target; not part of the emitted payload.
    #[serde(deserialize_with = "de_id")]
    pub receiver_id: String,
    pub message: String,
    #[serde(deserialize_with = "de_id")]
    pub load_id: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Returns the receiver alongside the payload.
pub fn build(input: ChatInput, now: DateTime<Utc>) -> (String, ChatMessage) {
    let msg = ChatMessage {
        sender_id: input.sender_id,
        sender_name: input.sender_name,
        message: input.message,
        load_id: input.load_id,
        timestamp: format_timestamp(now),
        avatar_url: input.avatar_url,
    };
    (input.receiver_id, msg)
}

/// Build and deliver to the receiver's connections under every chat alias.
pub fn emit(dispatcher: &dyn EventDispatcher, input: ChatInput) -> EventPayload {
    let (receiver, msg) = build(input, Utc::now());
    let payload = EventPayload::from(msg);
    dispatcher.dispatch(Domain::Chat.aliases(), &payload, Some(receiver.as_str()));
    payload
}
