//! Error types for review-core.

use thiserror::Error;

use crate::types::{Phase, ReviewMode};

/// Result type alias using ReviewError.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Failures reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Operations the session state machine refuses in its current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session is {0:?}, not active")]
    NotActive(Phase),

    #[error("a submission for the current word is already in flight")]
    SubmissionInFlight,

    #[error("{action} is not available in {mode} mode")]
    WrongMode {
        action: &'static str,
        mode: ReviewMode,
    },

    #[error("answer must be checked before a verdict can be recorded")]
    AnswerNotChecked,

    #[error("answer has already been checked")]
    AnswerAlreadyChecked,

    #[error("answer is empty")]
    EmptyAnswer,

    #[error("verdict does not match the checked answer")]
    VerdictMismatch,
}

/// Errors surfaced to the presentation layer.
///
/// None of these are fatal; each is reported where the external call was
/// made and the session keeps its state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("failed to fetch: {0}")]
    FetchFailed(ServiceError),

    #[error("failed to submit review: {0}")]
    SubmissionFailed(ServiceError),

    #[error("check-in failed: {0}")]
    CheckInFailed(ServiceError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
