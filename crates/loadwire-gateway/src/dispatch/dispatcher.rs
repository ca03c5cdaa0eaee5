use std::sync::Arc;

use loadwire_core::protocol::EventPayload;

use crate::realtime::{Connection, PreparedMsg, SessionRegistry};

/// Fan-out primitive: deliver one payload under each event name, either to the
/// connections of `target` or to every connection.
///
/// Fire-and-forget. Implementations never block on delivery and never report
/// per-recipient failures to the caller.
pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event_names: &[&'static str], payload: &EventPayload, target: Option<&str>);
}

/// Socket dispatcher backed by the session registry.
pub struct SocketDispatcher {
    sessions: Arc<SessionRegistry>,
}

impl SocketDispatcher {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    fn recipients(&self, target: Option<&str>) -> Vec<Connection> {
        match target {
            Some(user) => self.sessions.get_user_sessions(user),
            None => self.sessions.all_sessions(),
        }
    }
}

impl EventDispatcher for SocketDispatcher {
    fn dispatch(&self, event_names: &[&'static str], payload: &EventPayload, target: Option<&str>) {
        if event_names.is_empty() {
            tracing::warn!(?target, "dispatch called without event names");
            return;
        }

        let recipients = self.recipients(target);
        tracing::debug!(
            events = ?event_names,
            ?target,
            recipients = recipients.len(),
            ?payload,
            "dispatch"
        );

        // Alias order is queue order for every recipient.
        for &event in event_names {
            let prepared = match PreparedMsg::prepare(event, payload) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(event, error = %e, "frame encode failed");
                    continue;
                }
            };

            let mut dropped = 0usize;
            for conn in &recipients {
                if conn.tx.try_send(prepared.to_ws_message()).is_err() {
                    dropped += 1;
                }
            }
            if dropped > 0 {
                tracing::debug!(event = prepared.event(), dropped, "frames dropped (queue full or closed)");
            }
        }
    }
}
