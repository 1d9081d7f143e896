//! Runtime for chat sessions
//!
//! Each conversation id maps to exactly one `SessionStore`; stores never
//! share history or busy state.

mod error;
mod executor;
pub mod traits;


pub use error::{ResolutionError, ResolutionErrorKind};
pub use executor::{PendingReply, SessionSnapshot, SessionStore};
pub use traits::*;

use crate::message::Message;
use crate::state_machine::SessionContext;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

/// Events sent to subscribers of a session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A message was appended to the history
    Message { message: Message },
    /// The busy flag changed
    StateChange { busy: bool },
    /// The history was emptied
    Cleared,
}

/// Registry of all live sessions, keyed by conversation id
pub struct SessionRegistry<B: ResolutionBackend + 'static> {
    backend: Arc<B>,
    sessions: RwLock<HashMap<String, SessionStore<B>>>,
}

impl<B: ResolutionBackend + 'static> SessionRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get the session for `session_id`, creating an empty one on first use
    pub async fn get_or_create(&self, session_id: &str) -> SessionStore<B> {
        // Check if already live
        {
            let sessions = self.sessions.read().await;
            if let Some(store) = sessions.get(session_id) {
                return store.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::info!(session_id = %session_id, "Starting session");
                let (broadcast_tx, _) = broadcast::channel(128);
                SessionStore::new(
                    SessionContext::new(session_id),
                    self.backend.clone(),
                    broadcast_tx,
                )
            })
            .clone()
    }

    /// Get the session for `session_id` if one exists
    pub async fn get(&self, session_id: &str) -> Option<SessionStore<B>> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Drop sessions with no history, nothing in flight and nobody
    /// holding or watching them. Returns how many were removed.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, store| !store.is_evictable());
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Run `evict_idle` every `period` for as long as the registry lives
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let registry = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(registry) = registry.upgrade() else {
                    break;
                };
                registry.evict_idle().await;
            }
        })
    }

    /// Number of live sessions
    #[allow(dead_code)] // Used by tests and diagnostics
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
