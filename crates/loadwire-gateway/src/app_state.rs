//! Shared application state for the loadwire gateway.
//!
//! Wires the session registry, the socket dispatcher, and the builder entry
//! point (`Notifier`). Cloning is cheap; every field is shared.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::dispatch::{EventDispatcher, SocketDispatcher};
use crate::realtime::SessionRegistry;
use crate::services::Notifier;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<GatewayConfig>,
    sessions: Arc<SessionRegistry>,
    notifier: Notifier,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        let sessions = Arc::new(SessionRegistry::new());
        let dispatcher: Arc<dyn EventDispatcher> =
            Arc::new(SocketDispatcher::new(Arc::clone(&sessions)));

        Self {
            cfg: Arc::new(cfg),
            sessions,
            notifier: Notifier::new(dispatcher),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.cfg
    }

    pub fn sessions(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.sessions)
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
