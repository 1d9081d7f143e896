//! Session store: owns history and busy state, runs the resolution pipeline

use super::traits::ResolutionBackend;
use super::SessionEvent;

use crate::message::Message;
use crate::state_machine::{transition, Effect, Event, SessionContext, SessionState, TransitionError};
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Read-only view of a session for observers
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub busy: bool,
}

#[derive(Debug, Default)]
struct SessionInner {
    state: SessionState,
    history: Vec<Message>,
}

/// What applying one event changed
#[derive(Debug, Default)]
struct Applied {
    appended: Vec<Message>,
    /// `(query_id, query)` when the transition asked for a resolution
    resolution_request: Option<(String, String)>,
}

/// Generic session store that can work with any resolution backend
///
/// Cloning yields another handle to the same session.
pub struct SessionStore<B>
where
    B: ResolutionBackend + 'static,
{
    context: Arc<SessionContext>,
    inner: Arc<Mutex<SessionInner>>,
    backend: Arc<B>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
}

impl<B: ResolutionBackend + 'static> Clone for SessionStore<B> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            inner: self.inner.clone(),
            backend: self.backend.clone(),
            broadcast_tx: self.broadcast_tx.clone(),
        }
    }
}

/// An accepted query whose reply is still being produced
///
/// The pipeline runs on its own task; dropping this handle does not cancel it.
pub struct PendingReply {
    pub user_message: Message,
    handle: JoinHandle<Option<Message>>,
}

impl PendingReply {
    /// Wait for the assistant reply. `None` if the reply was discarded
    /// because history was cleared while it was in flight.
    #[allow(dead_code)] // Awaited by `submit` and tests
    pub async fn reply(self) -> Option<Message> {
        match self.handle.await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Resolution task did not complete");
                None
            }
        }
    }
}

impl<B: ResolutionBackend + 'static> SessionStore<B> {
    pub fn new(
        context: SessionContext,
        backend: Arc<B>,
        broadcast_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            context: Arc::new(context),
            inner: Arc::new(Mutex::new(SessionInner::default())),
            backend,
            broadcast_tx,
        }
    }

    #[allow(dead_code)] // Used by tests and diagnostics
    pub fn session_id(&self) -> &str {
        &self.context.session_id
    }

    /// Current history and busy flag
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            messages: inner.history.clone(),
            busy: inner.state.is_busy(),
        }
    }

    pub fn history(&self) -> Vec<Message> {
        self.lock().history.clone()
    }

    #[allow(dead_code)] // Used by tests and diagnostics
    pub fn is_busy(&self) -> bool {
        self.lock().state.is_busy()
    }

    /// Subscribe to session updates
    #[allow(dead_code)] // Streams use `snapshot_and_subscribe`
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Snapshot and subscription taken together
    ///
    /// Events are broadcast while the session lock is held, so the receiver
    /// sees exactly the changes made after the snapshot.
    pub fn snapshot_and_subscribe(&self) -> (SessionSnapshot, broadcast::Receiver<SessionEvent>) {
        let inner = self.lock();
        let rx = self.broadcast_tx.subscribe();
        let snapshot = SessionSnapshot {
            messages: inner.history.clone(),
            busy: inner.state.is_busy(),
        };
        (snapshot, rx)
    }

    /// True when dropping this session loses nothing: no history, nothing in
    /// flight, no subscribers and no other handle
    pub(super) fn is_evictable(&self) -> bool {
        if Arc::strong_count(&self.inner) > 1 || self.broadcast_tx.receiver_count() > 0 {
            return false;
        }
        let inner = self.lock();
        inner.history.is_empty() && !inner.state.is_busy()
    }

    /// Empty the history. Always succeeds; a reply still in flight is dropped.
    pub fn clear(&self) {
        let mut inner = self.lock();
        match self.apply(&mut inner, Event::ClearHistory) {
            Ok(_) => tracing::info!(session_id = %self.context.session_id, "History cleared"),
            Err(e) => {
                tracing::error!(session_id = %self.context.session_id, error = %e, "Clear rejected");
            }
        }
    }

    /// Submit a query and wait for the reply
    ///
    /// Rejections (empty, too long, busy) leave the session untouched.
    /// Backend failures are never returned: they become an apology reply.
    #[allow(dead_code)] // The HTTP layer uses `begin`
    pub async fn submit(&self, text: &str) -> Result<Option<Message>, TransitionError> {
        let pending = self.begin(text)?;
        Ok(pending.reply().await)
    }

    /// Accept a query and start resolving it in the background
    ///
    /// The user message is in the history by the time this returns.
    /// Must be called from within a Tokio runtime.
    pub fn begin(&self, text: &str) -> Result<PendingReply, TransitionError> {
        let event = Event::user_query(text);
        let (user_message, query_id, query) = {
            let mut inner = self.lock();
            let applied = self.apply(&mut inner, event)?;
            let Some((query_id, query)) = applied.resolution_request else {
                return Err(TransitionError::InvalidTransition(
                    "Query accepted without a resolution request".to_string(),
                ));
            };
            let Some(user_message) = applied.appended.into_iter().next() else {
                return Err(TransitionError::InvalidTransition(
                    "Query accepted without a user message".to_string(),
                ));
            };
            (user_message, query_id, query)
        };

        tracing::info!(
            session_id = %self.context.session_id,
            message_id = %query_id,
            chars = query.chars().count(),
            "Query accepted"
        );

        let store = self.clone();
        let handle = tokio::spawn(async move { store.run_resolution(query_id, query).await });

        Ok(PendingReply {
            user_message,
            handle,
        })
    }

    /// Await the backend and fold its outcome back into the session
    async fn run_resolution(&self, query_id: String, query: String) -> Option<Message> {
        let outcome = AssertUnwindSafe(self.backend.resolve(&query))
            .catch_unwind()
            .await;

        let event = match outcome {
            Ok(Ok(resolution)) => Event::resolution_complete(query_id, resolution),
            Ok(Err(e)) => {
                tracing::warn!(
                    session_id = %self.context.session_id,
                    message_id = %query_id,
                    kind = e.kind.as_str(),
                    error = %e,
                    "Resolution failed, replying with apology"
                );
                Event::resolution_failed(query_id, e.to_string())
            }
            Err(panic) => {
                let error = panic_message(panic.as_ref());
                tracing::error!(
                    session_id = %self.context.session_id,
                    message_id = %query_id,
                    error = %error,
                    "Resolution panicked, replying with apology"
                );
                Event::resolution_failed(query_id, error)
            }
        };

        let mut inner = self.lock();
        match self.apply(&mut inner, event) {
            Ok(applied) => applied.appended.into_iter().next(),
            Err(e) => {
                tracing::error!(session_id = %self.context.session_id, error = %e, "Dropping resolution outcome");
                None
            }
        }
    }

    /// Run the pure transition and execute its effects against the session
    fn apply(&self, inner: &mut SessionInner, event: Event) -> Result<Applied, TransitionError> {
        let result = transition(&inner.state, &self.context, event)?;
        inner.state = result.new_state;

        let mut applied = Applied::default();
        for effect in result.effects {
            match effect {
                Effect::AppendMessage { message } => {
                    inner.history.push(message.clone());
                    let _ = self.broadcast_tx.send(SessionEvent::Message {
                        message: message.clone(),
                    });
                    applied.appended.push(message);
                }
                Effect::ClearHistory => {
                    inner.history.clear();
                    let _ = self.broadcast_tx.send(SessionEvent::Cleared);
                }
                Effect::RequestResolution { query_id, query } => {
                    applied.resolution_request = Some((query_id, query));
                }
                Effect::DiscardReply { query_id } => {
                    tracing::info!(
                        session_id = %self.context.session_id,
                        message_id = %query_id,
                        "Reply discarded, history was cleared while resolving"
                    );
                }
                Effect::NotifyStateChange { busy } => {
                    tracing::debug!(
                        session_id = %self.context.session_id,
                        state = inner.state.name(),
                        busy,
                        "State changed"
                    );
                    let _ = self.broadcast_tx.send(SessionEvent::StateChange { busy });
                }
            }
        }
        Ok(applied)
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "resolution panicked".to_string()
    }
}
