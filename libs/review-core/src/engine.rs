//! Async driver for review sessions.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{ReviewError, Result};
use crate::service::ReviewService;
use crate::session::{ReviewSession, SessionView, SubmissionResolution, SubmissionTicket};
use crate::submit::{SubmissionAdapter, SubmissionOutcome};
use crate::types::{Phase, ReviewMode, Verdict};
use crate::verify::AnswerCheck;

/// Result of a recorded verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
    /// Verification of the typed answer, in spelling modes.
    pub check: Option<AnswerCheck>,
    pub verdict: Verdict,
    pub resolution: SubmissionResolution,
    pub view: SessionView,
}

struct EngineInner<S> {
    service: S,
    session: Mutex<ReviewSession>,
    // Mode applied to every new session; follows the last mode switch.
    preferred_mode: Mutex<ReviewMode>,
}

/// Owns the current review session and sequences verification,
/// submission and state transitions.
///
/// Cloning shares the same session. Locks are never held across a service
/// call, so the binding can read a snapshot while a submission is in flight.
pub struct ReviewEngine<S> {
    inner: Arc<EngineInner<S>>,
}

impl<S> Clone for ReviewEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ReviewService> ReviewEngine<S> {
    pub fn new(service: S) -> Self {
        Self::with_mode(service, ReviewMode::default())
    }

    /// Create an engine whose sessions open in `mode`.
    pub fn with_mode(service: S, mode: ReviewMode) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                service,
                session: Mutex::new(ReviewSession::loading()),
                preferred_mode: Mutex::new(mode),
            }),
        }
    }

    pub fn service(&self) -> &S {
        &self.inner.service
    }

    pub async fn view(&self) -> SessionView {
        self.inner.session.lock().await.view()
    }

    /// Discard the current session and start over with a freshly fetched
    /// batch.
    ///
    /// On fetch failure the new session stays in `Loading`. A batch that
    /// arrives after another refresh has begun is dropped.
    pub async fn refresh(&self) -> Result<SessionView> {
        let load_id = {
            let mut session = self.inner.session.lock().await;
            *session = ReviewSession::loading();
            session.id()
        };

        let fetched = self.inner.service.fetch_due_words().await;
        let mode = *self.inner.preferred_mode.lock().await;
        let mut session = self.inner.session.lock().await;

        if session.id() != load_id {
            tracing::debug!("dropping batch fetched for a replaced session");
            return Ok(session.view());
        }

        let items = fetched.map_err(|e| {
            tracing::warn!(error = %e, "failed to fetch due words");
            ReviewError::FetchFailed(e)
        })?;

        tracing::info!(count = items.len(), "due words loaded");
        *session = ReviewSession::start(items);
        if session.phase() == Phase::Active && mode != session.mode() {
            session.set_mode(mode)?;
        }
        Ok(session.view())
    }

    pub async fn set_mode(&self, mode: ReviewMode) -> Result<SessionView> {
        let mut session = self.inner.session.lock().await;
        session.set_mode(mode)?;
        *self.inner.preferred_mode.lock().await = mode;
        Ok(session.view())
    }

    /// Flip the current card.
    pub async fn reveal(&self) -> Result<bool> {
        Ok(self.inner.session.lock().await.reveal()?)
    }

    pub async fn set_input(&self, text: &str) -> Result<()> {
        Ok(self.inner.session.lock().await.set_input(text)?)
    }

    /// Type, check and record an answer in one step.
    ///
    /// The verification result is the verdict that gets submitted.
    pub async fn submit_answer(&self, text: &str) -> Result<ReviewOutcome> {
        let (check, ticket) = {
            let mut session = self.inner.session.lock().await;
            session.set_input(text)?;
            let check = session.check_answer()?;
            let ticket = session.begin_verdict(Verdict::from_remembered(check.is_correct))?;
            (check, ticket)
        };
        self.submit(ticket, Some(check)).await
    }

    /// Record a remembered/forgotten verdict for the current word.
    ///
    /// In spelling modes this re-sends the verdict of an already checked
    /// answer, e.g. after a failed submission.
    pub async fn record_verdict(&self, remembered: bool) -> Result<ReviewOutcome> {
        let ticket = self
            .inner
            .session
            .lock()
            .await
            .begin_verdict(Verdict::from_remembered(remembered))?;
        self.submit(ticket, None).await
    }

    async fn submit(
        &self,
        ticket: SubmissionTicket,
        check: Option<AnswerCheck>,
    ) -> Result<ReviewOutcome> {
        let outcome = SubmissionAdapter::new(&self.inner.service)
            .submit(&ticket.word_id, ticket.verdict)
            .await;

        let mut session = self.inner.session.lock().await;
        let resolution = session.finish_submission(&ticket, outcome.is_accepted());

        match outcome {
            SubmissionOutcome::Rejected(e) if resolution == SubmissionResolution::Stuck => {
                Err(ReviewError::SubmissionFailed(e))
            }
            _ => Ok(ReviewOutcome {
                check,
                verdict: ticket.verdict,
                resolution,
                view: session.view(),
            }),
        }
    }
}
