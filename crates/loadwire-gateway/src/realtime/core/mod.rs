//! Realtime core components for the gateway runtime.

mod session_registry;

pub use session_registry::{Connection, SessionRegistry};
