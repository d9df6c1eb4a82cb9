//! Review session state machine.
//!
//! A session moves `Loading -> Active -> (Completed | Empty)`. While active it
//! tracks the current word, the answer mode, the transient state of the word
//! being answered and the running verdict tally. Recording a verdict is split
//! in two steps so the remote write can happen in between:
//! [`ReviewSession::begin_verdict`] counts the verdict and enters the
//! submitting sub-state, [`ReviewSession::finish_submission`] leaves it and
//! advances only if the service accepted the write.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SessionError;
use crate::types::{ItemState, Phase, ReviewMode, ReviewStats, SessionId, Verdict, WordCard};
use crate::verify::{verify_answer, AnswerCheck};

/// Proof that a verdict is waiting on the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub session_id: SessionId,
    pub index: usize,
    pub word_id: String,
    pub verdict: Verdict,
}

/// What happened when a submission resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmissionResolution {
    /// Moved on to the word at `index`.
    Advanced { index: usize },
    /// The last word was recorded.
    Completed,
    /// The service rejected the write; still on the same word.
    Stuck,
    /// The ticket belongs to a session that has since been replaced.
    Stale,
}

/// Snapshot of a session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub phase: Phase,
    pub mode: ReviewMode,
    pub current_index: usize,
    pub total: usize,
    pub current: Option<WordCard>,
    pub item_state: ItemState,
    pub stats: ReviewStats,
    pub submitting: bool,
    pub progress_percent: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// One pass over a batch of due words.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    id: SessionId,
    phase: Phase,
    items: Vec<WordCard>,
    current_index: usize,
    mode: ReviewMode,
    item_state: ItemState,
    stats: ReviewStats,
    // Verdict already counted for the current word, kept across mode changes
    // so a retried submission is not counted twice.
    counted: Option<Verdict>,
    submitting: Option<SubmissionTicket>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::loading()
    }
}

impl ReviewSession {
    /// A session waiting for its batch.
    pub fn loading() -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::Loading,
            items: Vec::new(),
            current_index: 0,
            mode: ReviewMode::Card,
            item_state: ItemState::fresh(ReviewMode::Card),
            stats: ReviewStats::default(),
            counted: None,
            submitting: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Start reviewing `items` in the order given.
    ///
    /// An empty batch yields a terminal `Empty` session.
    pub fn start(items: Vec<WordCard>) -> Self {
        let phase = if items.is_empty() {
            Phase::Empty
        } else {
            Phase::Active
        };
        tracing::debug!(count = items.len(), ?phase, "starting review session");

        Self {
            phase,
            items,
            ..Self::loading()
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> ReviewMode {
        self.mode
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn stats(&self) -> ReviewStats {
        self.stats
    }

    pub fn item_state(&self) -> &ItemState {
        &self.item_state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    /// The word being answered. `None` unless the session is active.
    pub fn current_item(&self) -> Option<&WordCard> {
        match self.phase {
            Phase::Active => self.items.get(self.current_index),
            _ => None,
        }
    }

    /// Position through the batch as a whole percent.
    pub fn progress_percent(&self) -> u32 {
        match self.phase {
            Phase::Active => {
                ((self.current_index + 1) as f64 / self.items.len() as f64 * 100.0).round() as u32
            }
            Phase::Completed => 100,
            Phase::Loading | Phase::Empty => 0,
        }
    }

    /// Switch the answer mode. Clears the current word's transient state
    /// only.
    pub fn set_mode(&mut self, mode: ReviewMode) -> Result<(), SessionError> {
        self.ensure_active()?;
        self.mode = mode;
        self.item_state = ItemState::fresh(mode);
        tracing::debug!(%mode, index = self.current_index, "review mode changed");
        Ok(())
    }

    /// Flip the card. Returns whether the meaning side is now shown.
    pub fn reveal(&mut self) -> Result<bool, SessionError> {
        self.ensure_active()?;
        match &mut self.item_state {
            ItemState::Card { revealed } => {
                *revealed = !*revealed;
                Ok(*revealed)
            }
            ItemState::Spelling { .. } => Err(SessionError::WrongMode {
                action: "flip",
                mode: self.mode,
            }),
        }
    }

    /// Replace the typed answer for the current word.
    pub fn set_input(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_idle()?;
        match &mut self.item_state {
            ItemState::Spelling {
                result_shown: true, ..
            } => Err(SessionError::AnswerAlreadyChecked),
            ItemState::Spelling { input, .. } => {
                *input = text.into();
                Ok(())
            }
            ItemState::Card { .. } => Err(SessionError::WrongMode {
                action: "typing an answer",
                mode: self.mode,
            }),
        }
    }

    /// Verify the typed answer and show the result.
    ///
    /// The returned check decides the verdict for this word in spelling
    /// modes.
    pub fn check_answer(&mut self) -> Result<AnswerCheck, SessionError> {
        self.ensure_idle()?;
        let mode = self.mode;
        let card = self
            .items
            .get(self.current_index)
            .ok_or(SessionError::NotActive(self.phase))?;

        let ItemState::Spelling {
            input,
            result_shown,
            was_correct,
        } = &mut self.item_state
        else {
            return Err(SessionError::WrongMode {
                action: "checking an answer",
                mode,
            });
        };
        if *result_shown {
            return Err(SessionError::AnswerAlreadyChecked);
        }
        if input.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        let check = verify_answer(mode, card, input).ok_or(SessionError::WrongMode {
            action: "checking an answer",
            mode,
        })?;
        *result_shown = true;
        *was_correct = check.is_correct;
        tracing::debug!(word_id = %card.id, correct = check.is_correct, "answer checked");
        Ok(check)
    }

    /// Count a verdict for the current word and enter the submitting
    /// sub-state.
    ///
    /// In card mode the verdict is whatever the user reports. In spelling
    /// modes the answer must have been checked and the verdict must agree with
    /// the check.
    pub fn begin_verdict(&mut self, verdict: Verdict) -> Result<SubmissionTicket, SessionError> {
        self.ensure_active()?;
        if self.submitting.is_some() {
            return Err(SessionError::SubmissionInFlight);
        }
        match &self.item_state {
            ItemState::Card { .. } => {}
            ItemState::Spelling {
                result_shown: false,
                ..
            } => return Err(SessionError::AnswerNotChecked),
            ItemState::Spelling { was_correct, .. } => {
                if *was_correct != verdict.is_remembered() {
                    return Err(SessionError::VerdictMismatch);
                }
            }
        }
        let word_id = self
            .items
            .get(self.current_index)
            .map(|card| card.id.clone())
            .ok_or(SessionError::NotActive(self.phase))?;

        match self.counted {
            Some(previous) if previous == verdict => {}
            Some(previous) => {
                self.stats.unrecord(previous);
                self.stats.record(verdict);
            }
            None => self.stats.record(verdict),
        }
        self.counted = Some(verdict);

        let ticket = SubmissionTicket {
            session_id: self.id,
            index: self.current_index,
            word_id,
            verdict,
        };
        self.submitting = Some(ticket.clone());
        Ok(ticket)
    }

    /// Leave the submitting sub-state.
    ///
    /// Advances only when `accepted`; a rejected write leaves the session on
    /// the same word with the verdict still counted.
    pub fn finish_submission(
        &mut self,
        ticket: &SubmissionTicket,
        accepted: bool,
    ) -> SubmissionResolution {
        if ticket.session_id != self.id || self.submitting.as_ref() != Some(ticket) {
            tracing::warn!(
                word_id = %ticket.word_id,
                session = %ticket.session_id,
                "ignoring submission result for a replaced session"
            );
            return SubmissionResolution::Stale;
        }
        self.submitting = None;

        if !accepted {
            return SubmissionResolution::Stuck;
        }

        if self.current_index + 1 >= self.items.len() {
            self.phase = Phase::Completed;
            self.completed_at = Some(Utc::now());
            tracing::info!(
                session = %self.id,
                remembered = self.stats.remembered_count,
                forgotten = self.stats.forgotten_count,
                "review session completed"
            );
            SubmissionResolution::Completed
        } else {
            self.current_index += 1;
            self.item_state = ItemState::fresh(self.mode);
            self.counted = None;
            SubmissionResolution::Advanced {
                index: self.current_index,
            }
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            phase: self.phase,
            mode: self.mode,
            current_index: self.current_index,
            total: self.items.len(),
            current: self.current_item().cloned(),
            item_state: self.item_state.clone(),
            stats: self.stats,
            submitting: self.is_submitting(),
            progress_percent: self.progress_percent(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Active => Ok(()),
            phase => Err(SessionError::NotActive(phase)),
        }
    }

    /// Active with no submission in flight.
    fn ensure_idle(&self) -> Result<(), SessionError> {
        self.ensure_active()?;
        if self.submitting.is_some() {
            return Err(SessionError::SubmissionInFlight);
        }
        Ok(())
    }
}
