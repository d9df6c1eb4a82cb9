//! Submission adapter: one remote write per recorded verdict.

use crate::error::ServiceError;
use crate::service::ReviewService;
use crate::types::Verdict;

/// Result of a single verdict write. Failures are values, not errors, so
/// the caller decides what a rejected write means for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    Rejected(ServiceError),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Wraps a [`ReviewService`] for verdict writes.
///
/// Exactly one service call per [`submit`](Self::submit); no retry and no
/// deduplication. Guarding against duplicate writes is the session's job.
#[derive(Debug)]
pub struct SubmissionAdapter<'a, S> {
    service: &'a S,
}

impl<'a, S: ReviewService> SubmissionAdapter<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    pub async fn submit(&self, word_id: &str, verdict: Verdict) -> SubmissionOutcome {
        match self
            .service
            .submit_verdict(word_id, verdict.is_remembered())
            .await
        {
            Ok(()) => {
                tracing::debug!(word_id, ?verdict, "review recorded");
                SubmissionOutcome::Accepted
            }
            Err(e) => {
                tracing::warn!(word_id, ?verdict, error = %e, "review submission failed");
                SubmissionOutcome::Rejected(e)
            }
        }
    }
}
