//! API request and response types

use crate::message::Message;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request to submit a question
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for an accepted question
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// The user message as appended to history
    pub message: Message,
}

/// Messages from one calendar day
#[derive(Debug, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub messages: Vec<Message>,
}

/// History split into chronological per-day groups
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub days: Vec<DayGroup>,
}

/// Starter questions
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<&'static str>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
