//! Chat message types

use crate::knowledge::Resolution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reply used when resolution fails for any reason
pub const APOLOGY_CONTENT: &str = "I apologize, but I'm experiencing technical difficulties. Please try again or contact our support team for immediate assistance.";

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Name shown in transcripts
    pub fn display_name(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "FinanceBot",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single entry in a conversation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(id: impl Into<String>, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            sources: None,
            timestamp,
        }
    }

    pub fn assistant(
        id: impl Into<String>,
        resolution: Resolution,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: resolution.content,
            sources: Some(resolution.sources),
            timestamp,
        }
    }

    /// Apology reply, carries no sources
    pub fn apology(id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: APOLOGY_CONTENT.to_string(),
            sources: None,
            timestamp,
        }
    }

    /// Sources if present and non-empty
    pub fn citations(&self) -> Option<&[String]> {
        self.sources.as_deref().filter(|s| !s.is_empty())
    }
}

/// Generate a fresh message id
pub fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
