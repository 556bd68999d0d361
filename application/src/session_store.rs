use domain::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// One stored conversation. `gate` serializes whole operations (a submit
/// spans a backend call), `transcript` guards the turns themselves so
/// readers can see the user turn while a reply is still pending.
#[derive(Debug)]
pub struct SessionEntry {
    gate: Mutex<()>,
    transcript: RwLock<Session>,
}

impl SessionEntry {
    fn new(id: &str) -> Self {
        Self {
            gate: Mutex::new(()),
            transcript: RwLock::new(Session::new(id.to_string())),
        }
    }

    pub fn gate(&self) -> &Mutex<()> {
        &self.gate
    }

    pub fn transcript(&self) -> &RwLock<Session> {
        &self.transcript
    }
}

/// Process-wide registry of sessions by id. Entries are never evicted.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the id was not known before.
    pub async fn ensure(&self, id: &str) -> bool {
        if self.sessions.read().await.contains_key(id) {
            return false;
        }
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(id) {
            return false;
        }
        sessions.insert(id.to_string(), Arc::new(SessionEntry::new(id)));
        true
    }

    pub async fn get(&self, id: &str) -> Option<Arc<SessionEntry>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    pub async fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
