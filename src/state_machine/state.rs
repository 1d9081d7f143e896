//! Session state types

use serde::{Deserialize, Serialize};

/// Longest accepted query, in characters
pub const MAX_QUERY_CHARS: usize = 500;

/// Session state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for a query, nothing in flight
    #[default]
    Idle,

    /// A query is being resolved
    Resolving {
        /// Id of the user message that started this resolution
        query_id: String,
        /// History was cleared mid-flight; drop the reply when it lands
        #[serde(default)]
        discard_reply: bool,
    },
}

impl SessionState {
    /// True while a resolution is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Resolving { .. })
    }

    /// Short name used in state-change notifications
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Resolving { .. } => "resolving",
        }
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub max_query_chars: usize,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            max_query_chars: MAX_QUERY_CHARS,
        }
    }

    #[cfg(test)]
    pub fn with_max_query_chars(mut self, max: usize) -> Self {
        self.max_query_chars = max;
        self
    }
}
