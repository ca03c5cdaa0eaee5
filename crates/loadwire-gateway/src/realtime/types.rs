use axum::extract::ws::Message;
use serde::Serialize;

use loadwire_core::error::Result;
use loadwire_core::protocol::frame;

/// Prepared frame cached for fan-out (serialize once, send N times).
#[derive(Debug, Clone)]
pub struct PreparedMsg {
    event: &'static str,
    text: String,
}

impl PreparedMsg {
    pub fn prepare<T: Serialize + ?Sized>(event: &'static str, data: &T) -> Result<Self> {
        Ok(Self {
            event,
            text: frame::encode(event, data)?,
        })
    }

    pub fn event(&self) -> &'static str {
        self.event
    }

    /// Convert to axum::ws::Message for transport.
    pub fn to_ws_message(&self) -> Message {
        Message::Text(self.text.clone())
    }
}
