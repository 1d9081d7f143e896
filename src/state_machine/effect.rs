//! Effects produced by state transitions

use crate::message::Message;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a message to the history
    AppendMessage { message: Message },

    /// Empty the history
    ClearHistory,

    /// Start resolving a query on the backend
    RequestResolution { query_id: String, query: String },

    /// A reply arrived after the history was cleared and is dropped
    DiscardReply { query_id: String },

    /// Notify connected clients of a busy-flag change
    NotifyStateChange { busy: bool },
}

impl Effect {
    pub fn append(message: Message) -> Self {
        Effect::AppendMessage { message }
    }

    pub fn notify_busy() -> Self {
        Effect::NotifyStateChange { busy: true }
    }

    pub fn notify_idle() -> Self {
        Effect::NotifyStateChange { busy: false }
    }
}
