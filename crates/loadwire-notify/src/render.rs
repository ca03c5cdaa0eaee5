//! Notification payload view and display rules.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const FALLBACK_SENDER: &str = "Unknown sender";
pub const FALLBACK_SENDER_TYPE: &str = "user";
pub const FALLBACK_RATE: &str = "N/A";
pub const ELLIPSIS: &str = "...";

/// Client-side view of a received payload.
///
/// Every field is optional and leniently typed: numbers are accepted where
/// text is expected, and anything else degrades to "absent".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(default, deserialize_with = "lenient_text")]
    pub bid_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub load_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sender_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sender_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sender_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// What the display surface shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotification {
    pub sender: String,
    pub sender_type: String,
    pub rate: String,
    pub body: String,
    pub bid_id: Option<String>,
    pub load_id: Option<String>,
}

impl NotificationData {
    pub fn render(&self, max_body_chars: usize) -> RenderedNotification {
        RenderedNotification {
            sender: self
                .sender_name
                .clone()
                .unwrap_or_else(|| FALLBACK_SENDER.to_string()),
            sender_type: self
                .sender_type
                .as_ref()
                .or(self.sender.as_ref())
                .cloned()
                .unwrap_or_else(|| FALLBACK_SENDER_TYPE.to_string()),
            rate: self
                .rate
                .clone()
                .unwrap_or_else(|| FALLBACK_RATE.to_string()),
            body: truncate(self.message.as_deref().unwrap_or_default(), max_body_chars),
            bid_id: self.bid_id.clone(),
            load_id: self.load_id.clone(),
        }
    }
}

/// Cut `s` to `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &s[..cut]),
        None => s.to_string(),
    }
}
