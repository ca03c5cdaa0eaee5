//! loadwire gateway library entry.
//!
//! Wires the transport, the session registry, the event dispatcher, and the
//! domain event builders into one server. It is consumed by the binary
//! (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ingest;
pub mod ops;
pub mod realtime;
pub mod router;
pub mod services;
pub mod transport;
