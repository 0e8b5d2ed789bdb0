//! Error types for microsvc command handlers.

use std::error::Error;
use std::fmt;

use crate::error::AwardError;
use crate::store::StoreError;

/// Error type for command handler operations.
#[derive(Debug)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    DecodeFailed(String),
    /// Guard rejected the command (input validation failed).
    GuardRejected(String),
    /// The achievement core refused or failed the operation.
    Award(AwardError),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::GuardRejected(name) => {
                write!(f, "guard rejected command: {}", name)
            }
            HandlerError::Award(e) => write!(f, "{}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Award(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AwardError> for HandlerError {
    fn from(err: AwardError) -> Self {
        HandlerError::Award(err)
    }
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        HandlerError::Award(AwardError::from(err))
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Award(e) => e.status_code(),
        }
    }

    /// Whether the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, HandlerError::Award(e) if e.is_retryable())
    }

    /// JSON error body: `{ "error": message }`, plus `"retryable": true` when
    /// the failure was unavailable data.
    pub fn body(&self) -> serde_json::Value {
        if self.is_retryable() {
            serde_json::json!({ "error": self.to_string(), "retryable": true })
        } else {
            serde_json::json!({ "error": self.to_string() })
        }
    }
}
