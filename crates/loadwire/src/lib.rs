//! Top-level facade crate for loadwire.
//!
//! Re-exports the core contracts, the gateway library, and the notification
//! client so users can depend on a single crate.

pub mod core {
    pub use loadwire_core::*;
}

pub mod gateway {
    pub use loadwire_gateway::*;
}

pub mod notify {
    pub use loadwire_notify::*;
}
