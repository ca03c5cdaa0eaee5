use axum::extract::ws::Message;
use dashmap::{DashMap, DashSet};
use tokio::sync::mpsc;

use std::sync::atomic::{AtomicU64, Ordering};

/// One session's outbound queue sender.
#[derive(Clone)]
pub struct Connection {
    pub tx: mpsc::Sender<Message>,
}

/// Session registry:
/// - `session_key -> Connection`
/// - `user_key -> {session_key...}`
///
/// A user may hold several live sessions (tabs, devices); addressed delivery
/// reaches all of them.
pub struct SessionRegistry {
    sessions: DashMap<String, Connection>,
    user_index: DashMap<String, DashSet<String>>,
    seq: AtomicU64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            user_index: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    /// Allocate a process-unique session key for `user_key`.
    pub fn next_session_key(&self, user_key: &str) -> String {
        let n = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{user_key}#{n}")
    }

    pub fn insert(&self, user_key: String, session_key: String, conn: Connection) {
        self.user_index
            .entry(user_key)
            .or_insert_with(DashSet::new)
            .insert(session_key.clone());

        self.sessions.insert(session_key, conn);
    }

    pub fn remove_session(&self, user_key: &str, session_key: &str) -> Option<Connection> {
        if let Some(set) = self.user_index.get(user_key) {
            set.remove(session_key);
            if set.is_empty() {
                drop(set);
                self.user_index.remove_if(user_key, |_, s| s.is_empty());
            }
        }
        self.sessions.remove(session_key).map(|(_, conn)| conn)
    }

    pub fn get_session(&self, session_key: &str) -> Option<Connection> {
        self.sessions.get(session_key).map(|r| r.value().clone())
    }

    /// Connections associated with one identity.
    pub fn get_user_sessions(&self, user_key: &str) -> Vec<Connection> {
        let Some(set) = self.user_index.get(user_key) else { return vec![]; };
        let keys: Vec<String> = set.iter().map(|s| s.key().to_string()).collect();
        drop(set);
        keys.iter().filter_map(|k| self.get_session(k)).collect()
    }

    /// Every live connection.
    pub fn all_sessions(&self) -> Vec<Connection> {
        self.sessions.iter().map(|r| r.value().clone()).collect()
    }

    pub fn count_user_sessions(&self, user_key: &str) -> usize {
        self.user_index.get(user_key).map(|s| s.len()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
