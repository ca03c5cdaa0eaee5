//! Event protocol modules.
//!
//! - `events`: static alias tables, one per domain.
//! - `payload`: canonical payload records as they appear on the wire.
//! - `frame`: the text frame (`{v, event, data}`) carrying one alias.
//!
//! Decoders are panic-free: malformed input is reported as `LoadwireError`.

pub mod events;
pub mod frame;
pub mod payload;

pub use events::Domain;
pub use frame::Frame;
pub use payload::{BidUpdate, ChatMessage, EventPayload, NegotiationMessage, SenderRole};
