//! Canonical event payloads.
//!
//! These are the finalized records the dispatcher fans out. Field names are
//! camelCase on the wire; optional fields are always present and serialize as
//! `null` when absent.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which side of a negotiation sent the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    #[default]
    Shipper,
    Inhouse,
}

impl SenderRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SenderRole::Shipper => "shipper",
            SenderRole::Inhouse => "inhouse",
        }
    }
}

/// Rate negotiation message on a bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationMessage {
    pub bid_id: String,
    pub load_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender: SenderRole,
    pub message: String,
    pub rate: Value,
    pub timestamp: String,
    pub sender_avatar: Option<String>,
    pub negotiation_data: Option<Value>,
}

/// Bid placed or changed on a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidUpdate {
    pub bid_id: String,
    pub load_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub driver_name: Option<String>,
    pub message: String,
    pub rate: Value,
    pub status: String,
    pub timestamp: String,
}

/// Direct chat message. The receiver is the addressing target, not a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender_id: String,
    pub sender_name: String,
    pub message: String,
    pub load_id: String,
    pub timestamp: String,
    pub avatar_url: Option<String>,
}

/// Any finalized payload the dispatcher can carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    Negotiation(NegotiationMessage),
    Bid(BidUpdate),
    Chat(ChatMessage),
}

impl From<NegotiationMessage> for EventPayload {
    fn from(m: NegotiationMessage) -> Self {
        EventPayload::Negotiation(m)
    }
}

impl From<BidUpdate> for EventPayload {
    fn from(m: BidUpdate) -> Self {
        EventPayload::Bid(m)
    }
}

impl From<ChatMessage> for EventPayload {
    fn from(m: ChatMessage) -> Self {
        EventPayload::Chat(m)
    }
}

/// Wire format of `timestamp`: RFC 3339, UTC, millisecond precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_is_millis_utc() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        assert_eq!(format_timestamp(at), "2026-10-19T08:00:00.000Z");
    }

    #[test]
    fn absent_optionals_serialize_as_null() {
        let m = ChatMessage {
            sender_id: "u1".into(),
            sender_name: "Ann".into(),
            message: "hi".into(),
            load_id: "L1".into(),
            timestamp: "t".into(),
            avatar_url: None,
        };
        let v = serde_json::to_value(EventPayload::from(m)).unwrap();
        assert!(v.get("avatarUrl").is_some_and(Value::is_null));
        assert_eq!(v["senderId"], "u1");
    }
}
