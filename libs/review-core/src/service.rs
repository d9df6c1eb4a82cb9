//! Remote service seams used by the engine.
//!
//! Transport is up to the implementor; the terminal client talks HTTP.

use std::future::Future;

use crate::error::ServiceError;
use crate::types::{CheckInReceipt, CheckInState, WordCard};

/// Word batches and per-word results.
pub trait ReviewService: Send + Sync {
    /// Words due for review now. An empty batch is a valid answer.
    fn fetch_due_words(&self) -> impl Future<Output = Result<Vec<WordCard>, ServiceError>> + Send;

    /// Record one remembered/forgotten result.
    fn submit_verdict(
        &self,
        word_id: &str,
        remembered: bool,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// Daily check-in streak.
pub trait CheckInService: Send + Sync {
    fn fetch_check_in_state(
        &self,
    ) -> impl Future<Output = Result<CheckInState, ServiceError>> + Send;

    fn perform_check_in(&self) -> impl Future<Output = Result<CheckInReceipt, ServiceError>> + Send;
}
