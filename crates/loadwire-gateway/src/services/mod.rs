//! Domain event builders.
//!
//! One builder per domain (negotiation, bid, chat). Each turns a raw record
//! from the business-logic layer into its canonical payload, stamps the
//! server timestamp, and fans it out through an `EventDispatcher` under the
//! domain's alias table.

pub mod bid;
pub mod chat;
pub mod negotiation;

use std::sync::Arc;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use loadwire_core::protocol::{Domain, EventPayload};

use crate::dispatch::EventDispatcher;

pub use bid::BidInput;
pub use chat::ChatInput;
pub use negotiation::NegotiationInput;

/// Entry point for raising events. Holds the dispatcher by reference-counted
/// handle; a detached notifier logs and skips every emit.
#[derive(Clone, Default)]
pub struct Notifier {
    dispatcher: Option<Arc<dyn EventDispatcher>>,
}

impl Notifier {
    pub fn new(dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self {
            dispatcher: Some(dispatcher),
        }
    }

    /// Notifier with no transport attached.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.dispatcher.is_some()
    }

    fn handle(&self, domain: Domain) -> Option<&dyn EventDispatcher> {
        let d = self.dispatcher.as_deref();
        if d.is_none() {
            tracing::warn!(domain = domain.as_str(), "no dispatcher attached; event skipped");
        }
        d
    }

    /// Returns the emitted payload, or `None` when skipped.
    pub fn negotiation_message(&self, input: NegotiationInput) -> Option<EventPayload> {
        self.handle(Domain::Negotiation)
            .map(|d| negotiation::emit(d, input))
    }

    pub fn bid_update(&self, input: BidInput) -> Option<EventPayload> {
        self.handle(Domain::Bid).map(|d| bid::emit(d, input))
    }

    pub fn chat_message(&self, input: ChatInput) -> Option<EventPayload> {
        self.handle(Domain::Chat).map(|d| chat::emit(d, input))
    }
}

/// Ids arrive as strings or numbers; both normalize to a string.
pub(crate) fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
