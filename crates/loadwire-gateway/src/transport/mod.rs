//! Transport layer (WebSocket).
//!
//! Exposes the WS upgrade handler and the codec that decodes inbound messages
//! once before the session loop looks at them.

pub mod codec;
pub mod ws;
