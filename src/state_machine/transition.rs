//! Pure state transition function

use super::{Effect, Event, SessionContext, SessionState};
use crate::message::Message;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. None of them change state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Query is empty")]
    EmptyQuery,
    #[error("Query is {actual} characters, the limit is {max}")]
    QueryTooLong { max: usize, actual: usize },
    #[error("A reply is still being prepared, wait for it before asking again")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Query submission
        // ============================================================

        // Idle + UserQuery -> Resolving
        (
            SessionState::Idle,
            Event::UserQuery {
                text,
                message_id,
                timestamp,
            },
        ) => {
            let query = validate_query(&text, context.max_query_chars)?;
            let user_message = Message::user(message_id.clone(), query, timestamp);
            Ok(TransitionResult::new(SessionState::Resolving {
                query_id: message_id.clone(),
                discard_reply: false,
            })
            .with_effect(Effect::append(user_message))
            .with_effect(Effect::notify_busy())
            .with_effect(Effect::RequestResolution {
                query_id: message_id,
                query: query.to_string(),
            }))
        }

        // Resolving + UserQuery -> reject, one resolution in flight at most
        (SessionState::Resolving { .. }, Event::UserQuery { .. }) => Err(TransitionError::Busy),

        // ============================================================
        // Resolution outcome
        // ============================================================
        (
            SessionState::Resolving {
                query_id,
                discard_reply,
            },
            Event::ResolutionComplete {
                query_id: completed_id,
                resolution,
                message_id,
                timestamp,
            },
        ) if *query_id == completed_id => {
            if *discard_reply {
                return Ok(discarded(completed_id));
            }
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::append(Message::assistant(
                    message_id, resolution, timestamp,
                )))
                .with_effect(Effect::notify_idle()))
        }

        (
            SessionState::Resolving {
                query_id,
                discard_reply,
            },
            Event::ResolutionFailed {
                query_id: failed_id,
                error: _,
                message_id,
                timestamp,
            },
        ) if *query_id == failed_id => {
            if *discard_reply {
                return Ok(discarded(failed_id));
            }
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::append(Message::apology(message_id, timestamp)))
                .with_effect(Effect::notify_idle()))
        }

        (
            _,
            Event::ResolutionComplete { query_id, .. } | Event::ResolutionFailed { query_id, .. },
        ) => Err(TransitionError::InvalidTransition(format!(
            "No resolution in flight for query {query_id}"
        ))),

        // ============================================================
        // Clearing history
        // ============================================================
        (SessionState::Idle, Event::ClearHistory) => {
            Ok(TransitionResult::new(SessionState::Idle).with_effect(Effect::ClearHistory))
        }

        // Mid-flight clear empties history now and drops the pending reply
        (SessionState::Resolving { query_id, .. }, Event::ClearHistory) => {
            Ok(TransitionResult::new(SessionState::Resolving {
                query_id: query_id.clone(),
                discard_reply: true,
            })
            .with_effect(Effect::ClearHistory))
        }
    }
}

fn discarded(query_id: String) -> TransitionResult {
    TransitionResult::new(SessionState::Idle)
        .with_effect(Effect::DiscardReply { query_id })
        .with_effect(Effect::notify_idle())
}

/// Trim the query and check it against the length limit
fn validate_query(text: &str, max_chars: usize) -> Result<&str, TransitionError> {
    let query = text.trim();
    if query.is_empty() {
        return Err(TransitionError::EmptyQuery);
    }
    let actual = query.chars().count();
    if actual > max_chars {
        return Err(TransitionError::QueryTooLong {
            max: max_chars,
            actual,
        });
    }
    Ok(query)
}
