//! Per-session scratch state
//!
//! Session state is explicit: a [`SessionContext`] is created when a client
//! opens a session, is passed into each request handler touching it, and is
//! dropped at teardown (session delete or process exit). Nothing here is
//! persisted and nothing crosses sessions.

pub mod notes;
pub mod quiz;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::session::notes::NotePad;
use crate::session::quiz::VocabQuiz;

/// One user's interactive session: notepad, quiz and creation time
#[derive(Debug)]
pub struct SessionContext {
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Append-only scratch notes
    pub notes: NotePad,
    /// Word-guessing game state
    pub quiz: VocabQuiz,
}

impl SessionContext {
    /// Create fresh session state with a randomly drawn quiz word
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            notes: NotePad::new(),
            quiz: VocabQuiz::new(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry of live sessions
///
/// Concurrent readers are fine; the inner mutexes serialize mutation per
/// session. Guards are never held across await points.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<SessionContext>>>>,
}

impl SessionManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session; this is the defined creation point of its state
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let context = Arc::new(Mutex::new(SessionContext::new()));

        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(id, context);
        debug!("Created session {} ({} live)", id, sessions.len());
        id
    }

    /// Look up a live session
    pub fn get(&self, id: &Uuid) -> Option<Arc<Mutex<SessionContext>>> {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(id).cloned()
    }

    /// Tear a session down; its state is dropped here
    pub fn remove(&self, id: &Uuid) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let removed = sessions.remove(id).is_some();
        if removed {
            debug!("Removed session {} ({} live)", id, sessions.len());
        }
        removed
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }

    /// Whether no session is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let manager = SessionManager::new();
        assert!(manager.is_empty());

        let id = manager.create();
        assert_eq!(manager.len(), 1);
        assert!(manager.get(&id).is_some());

        assert!(manager.remove(&id));
        assert!(manager.get(&id).is_none());
        assert!(!manager.remove(&id));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let manager = SessionManager::new();
        let a = manager.create();
        let b = manager.create();

        {
            let session = manager.get(&a).unwrap();
            let mut session = session.lock().unwrap();
            session.notes.append("only in a");
        }

        let session = manager.get(&b).unwrap();
        let session = session.lock().unwrap();
        assert!(session.notes.is_empty());
    }

    #[test]
    fn test_unknown_session_misses() {
        let manager = SessionManager::new();
        assert!(manager.get(&Uuid::new_v4()).is_none());
    }
}
