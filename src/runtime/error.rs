//! Resolution backend error types

use thiserror::Error;

/// Backend error with classification
///
/// The simulated backend never fails; fallible backends and test mocks build these.
#[allow(dead_code)]
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    pub message: String,
}

#[allow(dead_code)]
impl ResolutionError {
    pub fn new(kind: ResolutionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ResolutionErrorKind::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ResolutionErrorKind::Internal, message)
    }
}

/// Error classification, used for logging only; every kind degrades to the
/// same apology reply
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    /// Backend could not be reached
    Unavailable,
    /// Backend faulted while producing a reply
    Internal,
}

impl ResolutionErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
        }
    }
}
