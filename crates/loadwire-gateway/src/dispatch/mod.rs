//! Dispatcher module exports.
//!
//! Re-exports the dispatcher trait and its socket-backed implementation so
//! builders and tests can depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{EventDispatcher, SocketDispatcher};
