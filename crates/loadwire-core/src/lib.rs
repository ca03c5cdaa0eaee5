//! loadwire core: transport-agnostic event contracts and error types.
//!
//! This crate defines the wire-level contracts shared by the gateway (which
//! builds and distributes events) and the notify client (which consumes them):
//! the per-domain alias tables, the canonical payload records, and the text
//! frame that carries one aliased payload. It carries no transport or runtime
//! dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `LoadwireError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{LoadwireError, Result};
