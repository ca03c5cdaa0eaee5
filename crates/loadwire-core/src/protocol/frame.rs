//! Text frame carrying one aliased event.
//!
//! Wire shape: `{"v":1,"event":"<alias>","data":<payload>}`. A payload fanned
//! out under N aliases produces N frames whose `data` members are identical.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LoadwireError, Result};

/// Current frame version.
pub const FRAME_VERSION: u8 = 1;

/// Decoded inbound frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frame {
    /// Protocol version.
    pub v: u8,
    /// Event name (one alias).
    pub event: String,
    /// Payload, parsed lazily by the consumer.
    #[serde(default)]
    pub data: Value,
}

#[derive(Serialize)]
struct OutFrame<'a, T: Serialize + ?Sized> {
    v: u8,
    event: &'a str,
    data: &'a T,
}

impl Frame {
    /// Decode a text frame. Rejects unknown versions and empty event names.
    pub fn decode(s: &str) -> Result<Frame> {
        let frame: Frame = serde_json::from_str(s)
            .map_err(|e| LoadwireError::BadRequest(format!("invalid frame json: {e}")))?;
        if frame.v != FRAME_VERSION {
            return Err(LoadwireError::UnsupportedVersion);
        }
        if frame.event.is_empty() {
            return Err(LoadwireError::BadRequest("frame event must not be empty".into()));
        }
        Ok(frame)
    }
}

/// Encode `data` under `event` into a text frame.
pub fn encode<T: Serialize + ?Sized>(event: &str, data: &T) -> Result<String> {
    serde_json::to_string(&OutFrame {
        v: FRAME_VERSION,
        event,
        data,
    })
    .map_err(|e| LoadwireError::Internal(format!("frame encode failed: {e}")))
}
