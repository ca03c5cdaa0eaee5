//! loadwire notify: client-side ephemeral notification pipeline.
//!
//! A received negotiation event is surfaced as a single notification that
//! dismisses itself after a fixed duration unless the user dismisses or views
//! it first.
//!
//! - `timer`: cancellable one-shot timer handle
//! - `controller`: the notification state machine (`Idle`/`Visible`/`Closing`)
//! - `render`: payload view and display rules (truncation, fallback labels)
//! - `feed`: routes subscribed wire frames into the controller
//!
//! The controller owns its timer exclusively; every exit transition cancels
//! or releases it, so a timeout and a user action never both close.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod controller;
pub mod feed;
pub mod render;
pub mod timer;

pub use config::NotifyConfig;
pub use controller::{NotificationController, NotificationSink, NotificationState};
pub use feed::{FeedOutcome, NotificationFeed};
pub use render::{NotificationData, RenderedNotification};
pub use timer::CancellableTimer;
