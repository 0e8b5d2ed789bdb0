use std::fmt;

use crate::store::StoreError;

/// Outcome taxonomy for achievement operations.
///
/// Evaluation returns either a complete result or exactly one of these.
/// Malformed criteria on already-stored achievements are never reported here;
/// they evaluate to `false` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardError {
    /// No principal, or one that could not be authenticated.
    Unauthorized(String),
    /// Valid principal with an insufficient role or the wrong target.
    Forbidden(String),
    /// Unknown achievement or learner reference.
    NotFound { kind: &'static str, id: String },
    /// Creation-time validation failure, naming the offending field.
    ValidationFailed { field: &'static str, reason: String },
    /// Explicit grant of an achievement the learner already holds.
    Conflict {
        learner_id: String,
        achievement_id: String,
    },
    /// Persistence could not be read or written. Safe for the caller to retry.
    DataUnavailable(StoreError),
}

impl fmt::Display for AwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AwardError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            AwardError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            AwardError::NotFound { kind, id } => write!(f, "{} not found: {}", kind, id),
            AwardError::ValidationFailed { field, reason } => {
                write!(f, "validation failed on {}: {}", field, reason)
            }
            AwardError::Conflict {
                learner_id,
                achievement_id,
            } => write!(
                f,
                "learner {} already holds achievement {}",
                learner_id, achievement_id
            ),
            AwardError::DataUnavailable(e) => write!(f, "data unavailable: {}", e),
        }
    }
}

impl std::error::Error for AwardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AwardError::DataUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for AwardError {
    fn from(err: StoreError) -> Self {
        AwardError::DataUnavailable(err)
    }
}

impl AwardError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            AwardError::Unauthorized(_) => 401,
            AwardError::Forbidden(_) => 403,
            AwardError::NotFound { .. } => 404,
            AwardError::ValidationFailed { .. } => 400,
            AwardError::Conflict { .. } => 409,
            AwardError::DataUnavailable(_) => 503,
        }
    }

    /// Only unavailable data is worth retrying, and only by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AwardError::DataUnavailable(_))
    }
}
