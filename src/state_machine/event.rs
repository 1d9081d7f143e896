//! Events that can occur in a session

use crate::knowledge::Resolution;
use chrono::{DateTime, Utc};

/// Events that trigger state transitions
///
/// Ids and timestamps are minted by the caller so `transition` stays pure.
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserQuery {
        text: String,
        message_id: String,
        timestamp: DateTime<Utc>,
    },
    ClearHistory,

    // Backend events
    ResolutionComplete {
        query_id: String,
        resolution: Resolution,
        message_id: String,
        timestamp: DateTime<Utc>,
    },
    ResolutionFailed {
        query_id: String,
        error: String,
        message_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn user_query(text: impl Into<String>) -> Self {
        Event::UserQuery {
            text: text.into(),
            message_id: crate::message::new_message_id(),
            timestamp: Utc::now(),
        }
    }

    pub fn resolution_complete(query_id: impl Into<String>, resolution: Resolution) -> Self {
        Event::ResolutionComplete {
            query_id: query_id.into(),
            resolution,
            message_id: crate::message::new_message_id(),
            timestamp: Utc::now(),
        }
    }

    pub fn resolution_failed(query_id: impl Into<String>, error: impl Into<String>) -> Self {
        Event::ResolutionFailed {
            query_id: query_id.into(),
            error: error.into(),
            message_id: crate::message::new_message_id(),
            timestamp: Utc::now(),
        }
    }
}
