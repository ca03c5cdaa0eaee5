//! Event-name alias tables.
//!
//! Each domain emits one logical event under several names so that older and
//! newer clients keep working. Adding or retiring a compatibility alias is a
//! one-line edit to the table below.

/// Negotiation message aliases (broadcast).
pub const NEGOTIATION_ALIASES: &[&str] = &[
    "new_negotiation_message",
    "bid_negotiation_update",
    "negotiation_message",
];

/// Bid update aliases (broadcast).
pub const BID_ALIASES: &[&str] = &["new_bid", "bid_update"];

/// Chat message aliases (addressed to the receiver).
pub const CHAT_ALIASES: &[&str] = &["new_message", "receive_message", "chat_message"];

/// Event domains known to the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Negotiation,
    Bid,
    Chat,
}

impl Domain {
    /// Alias table for this domain, in delivery order.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Domain::Negotiation => NEGOTIATION_ALIASES,
            Domain::Bid => BID_ALIASES,
            Domain::Chat => CHAT_ALIASES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Negotiation => "negotiation",
            Domain::Bid => "bid",
            Domain::Chat => "chat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_unique_across_domains() {
        let mut all: Vec<&str> = NEGOTIATION_ALIASES
            .iter()
            .chain(BID_ALIASES)
            .chain(CHAT_ALIASES)
            .copied()
            .collect();
        let n = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), n);
    }
}
