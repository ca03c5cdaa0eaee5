//! Realtime runtime (egress side) for the loadwire gateway.
//!
//! Holds the session registry that the socket dispatcher fans frames into, and
//! the prepared-frame type shared by the dispatcher and the session loop.

pub mod core;
pub mod types;

pub use core::{Connection, SessionRegistry};
pub use types::PreparedMsg;
