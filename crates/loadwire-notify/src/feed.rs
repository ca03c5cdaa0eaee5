//! Frame feed: routes subscribed wire frames into a notification controller.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;

use loadwire_core::error::{LoadwireError, Result};
use loadwire_core::protocol::events::NEGOTIATION_ALIASES;
use loadwire_core::protocol::Frame;

use crate::controller::NotificationController;
use crate::render::NotificationData;

/// What happened to one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Shown (or replaced the visible notification).
    Opened,
    /// Same payload as the visible one, seen under a sibling alias.
    Duplicate,
    /// Subscribed event without a payload; nothing shown.
    Suppressed,
    /// Not a subscribed event.
    Ignored,
}

pub struct NotificationFeed {
    controller: Arc<NotificationController>,
    subscriptions: HashSet<String>,
}

impl NotificationFeed {
    /// Feed subscribed to the negotiation aliases.
    pub fn new(controller: Arc<NotificationController>) -> Self {
        Self::with_subscriptions(controller, NEGOTIATION_ALIASES.iter().copied())
    }

    pub fn with_subscriptions<I, S>(controller: Arc<NotificationController>, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            controller,
            subscriptions: events.into_iter().map(Into::into).collect(),
        }
    }

    pub fn controller(&self) -> &Arc<NotificationController> {
        &self.controller
    }

    pub fn is_subscribed(&self, event: &str) -> bool {
        self.subscriptions.contains(event)
    }

    /// Handle one text frame from the socket.
    pub fn handle_text(&self, text: &str) -> Result<FeedOutcome> {
        let frame = Frame::decode(text)?;
        if !self.is_subscribed(&frame.event) {
            tracing::trace!(event = %frame.event, "unsubscribed event ignored");
            return Ok(FeedOutcome::Ignored);
        }

        if frame.data.is_null() {
            self.controller.open(None)?;
            return Ok(FeedOutcome::Suppressed);
        }

        let data: NotificationData = serde_json::from_value(frame.data).map_err(|e| {
            LoadwireError::BadRequest(format!("{} payload is not an object: {e}", frame.event))
        })?;

        if self.controller.open_unless_same(data)? {
            Ok(FeedOutcome::Opened)
        } else {
            Ok(FeedOutcome::Duplicate)
        }
    }

    /// Drain frames until the transport closes the channel. Bad frames are
    /// logged and skipped.
    pub async fn pump(&self, mut frames: mpsc::Receiver<String>) {
        while let Some(text) = frames.recv().await {
            match self.handle_text(&text) {
                Ok(outcome) => tracing::debug!(?outcome, "frame handled"),
                Err(e) => tracing::warn!(error = %e, "frame rejected"),
            }
        }
        tracing::debug!("notification feed closed");
    }
}
