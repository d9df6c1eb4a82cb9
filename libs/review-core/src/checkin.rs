//! Daily check-in streak: cached service state, a guarded check-in call and
//! the milestone projection used for display.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{ReviewError, Result};
use crate::service::CheckInService;
use crate::types::CheckInState;

/// A streak length that earns a badge on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub days: u32,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Milestones shown on the dashboard, ascending by `days`.
pub const DEFAULT_MILESTONES: [Milestone; 8] = [
    Milestone { days: 1, name: "First Check-in", icon: "🏅" },
    Milestone { days: 7, name: "One Week Strong", icon: "🎖️" },
    Milestone { days: 14, name: "Fortnight Regular", icon: "⭐" },
    Milestone { days: 30, name: "Star of the Month", icon: "🌟" },
    Milestone { days: 60, name: "Dedicated Learner", icon: "💪" },
    Milestone { days: 90, name: "Quarter Champion", icon: "🏆" },
    Milestone { days: 180, name: "Half-Year Habit", icon: "👑" },
    Milestone { days: 365, name: "Year-Round Master", icon: "🎯" },
];

/// Milestones reached by a streak of `consecutive_days`.
pub fn achieved_milestones(consecutive_days: u32, table: &[Milestone]) -> Vec<Milestone> {
    table
        .iter()
        .filter(|m| consecutive_days >= m.days)
        .copied()
        .collect()
}

/// The first milestone not yet reached, with the days still to go.
pub fn next_milestone(consecutive_days: u32, table: &[Milestone]) -> Option<(Milestone, u32)> {
    table
        .iter()
        .find(|m| m.days > consecutive_days)
        .map(|m| (*m, m.days - consecutive_days))
}

/// Result of [`CheckInTracker::check_in`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckInOutcome {
    /// Today's check-in was already recorded; nothing was sent.
    AlreadyCheckedIn,
    /// Another check-in call is still running; nothing was sent.
    InFlight,
    CheckedIn {
        consecutive_days: u32,
        new_badge: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerPhase {
    Idle,
    CheckingIn,
}

#[derive(Debug)]
struct TrackerState {
    cached: CheckInState,
    phase: TrackerPhase,
}

struct TrackerInner<S> {
    service: S,
    state: Mutex<TrackerState>,
}

/// Read-through cache of the service's check-in state.
///
/// The cache changes only when the service says so: on [`load`](Self::load)
/// and on a successful [`check_in`](Self::check_in).
pub struct CheckInTracker<S> {
    inner: Arc<TrackerInner<S>>,
}

impl<S> Clone for CheckInTracker<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CheckInService> CheckInTracker<S> {
    pub fn new(service: S) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                service,
                state: Mutex::new(TrackerState {
                    cached: CheckInState::default(),
                    phase: TrackerPhase::Idle,
                }),
            }),
        }
    }

    pub fn service(&self) -> &S {
        &self.inner.service
    }

    /// Fetch the current state from the service.
    pub async fn load(&self) -> Result<CheckInState> {
        let state = self
            .inner
            .service
            .fetch_check_in_state()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "failed to fetch check-in state");
                ReviewError::FetchFailed(e)
            })?;

        self.inner.state.lock().await.cached = state.clone();
        Ok(state)
    }

    pub async fn state(&self) -> CheckInState {
        self.inner.state.lock().await.cached.clone()
    }

    pub async fn is_checking_in(&self) -> bool {
        self.inner.state.lock().await.phase == TrackerPhase::CheckingIn
    }

    /// Check in for today.
    ///
    /// Sends nothing if today is already checked in or a call is running.
    pub async fn check_in(&self) -> Result<CheckInOutcome> {
        {
            let mut state = self.inner.state.lock().await;
            if state.cached.today_checked_in {
                return Ok(CheckInOutcome::AlreadyCheckedIn);
            }
            if state.phase == TrackerPhase::CheckingIn {
                return Ok(CheckInOutcome::InFlight);
            }
            state.phase = TrackerPhase::CheckingIn;
        }

        let result = self.inner.service.perform_check_in().await;

        let mut state = self.inner.state.lock().await;
        state.phase = TrackerPhase::Idle;
        let receipt = result.map_err(|e| {
            tracing::warn!(error = %e, "check-in failed");
            ReviewError::CheckInFailed(e)
        })?;

        state.cached.consecutive_days = receipt.consecutive_days;
        state.cached.today_checked_in = true;
        if let Some(badges) = receipt.badges {
            state.cached.badges = badges;
        }
        tracing::info!(
            consecutive_days = receipt.consecutive_days,
            new_badge = ?receipt.new_badge,
            "checked in"
        );

        Ok(CheckInOutcome::CheckedIn {
            consecutive_days: receipt.consecutive_days,
            new_badge: receipt.new_badge,
        })
    }
}
