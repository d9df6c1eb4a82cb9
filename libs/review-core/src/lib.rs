//! Review session engine shared by the vocabulary review clients.
//!
//! Provides:
//! - Answer verification for the spelling modes
//! - The review session state machine (phases, modes, per-item state, stats)
//! - The submission adapter and async review engine
//! - Check-in streak tracking and milestone projection
//! - Shared types (WordCard, ReviewMode, CheckInState, etc.)

pub mod checkin;
pub mod engine;
pub mod error;
pub mod service;
pub mod session;
pub mod submit;
pub mod types;
pub mod verify;
pub mod wire;

pub use checkin::{
    achieved_milestones, next_milestone, CheckInOutcome, CheckInTracker, Milestone,
    DEFAULT_MILESTONES,
};
pub use engine::{ReviewEngine, ReviewOutcome};
pub use error::{ReviewError, Result, ServiceError, SessionError};
pub use service::{CheckInService, ReviewService};
pub use session::{ReviewSession, SessionView, SubmissionResolution, SubmissionTicket};
pub use submit::{SubmissionAdapter, SubmissionOutcome};
pub use types::{
    Badge, CheckInReceipt, CheckInState, ItemState, Phase, ReviewMode, ReviewStats, SessionId,
    Verdict, WordCard,
};
pub use verify::{check_foreign_spelling, check_native_meaning, verify_answer, AnswerCheck};
