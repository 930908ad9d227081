//! # Tax Form Status State Machine
//!
//! Models the approval lifecycle of a tax assessment form.
//!
//! ## States
//!
//! ```text
//! NotStarted ──save──▶ InProgress ──submit──▶ Submitted ──accept──▶ Accepted (terminal)
//!                          ▲                      │
//!                          │                      │ return
//!                          └────────save───── Returned
//! ```
//!
//! ## Design Decision
//!
//! A returned form cannot be resubmitted directly: `submit` is legal only
//! from `InProgress`, so the form must go back through `save` first. Saves
//! move the form to `InProgress` and are never audited; submit, return,
//! and accept always are (see [`HistoryEvent`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Status ─────────────────────────────────────────────────────────

/// The approval status of a tax form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxFormStatus {
    /// Form has been created but no details have been saved yet.
    NotStarted,
    /// Details have been saved at least once; form is editable.
    InProgress,
    /// Form is awaiting review.
    Submitted,
    /// Reviewer sent the form back for rework.
    Returned,
    /// Reviewer accepted the form (terminal).
    Accepted,
}

impl TaxFormStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [TaxFormStatus; 5] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Submitted,
        Self::Returned,
        Self::Accepted,
    ];

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Decide an edit: moves the form to `InProgress`.
    ///
    /// Legal from `NotStarted`, `InProgress`, and `Returned`; a returned
    /// form re-enters editing through a save.
    pub fn save(self) -> Result<Self, TransitionError> {
        match self {
            Self::NotStarted | Self::InProgress | Self::Returned => Ok(Self::InProgress),
            current => Err(TransitionError {
                current,
                required: Self::InProgress,
            }),
        }
    }

    /// Decide a submission for review.
    ///
    /// Legal only from `InProgress`; a `Returned` form must be saved
    /// (edited) before it can be resubmitted.
    pub fn submit(self) -> Result<Self, TransitionError> {
        match self {
            Self::InProgress => Ok(Self::Submitted),
            current => Err(TransitionError {
                current,
                required: Self::Submitted,
            }),
        }
    }

    /// Decide a return for rework. Legal only from `Submitted`.
    pub fn return_form(self) -> Result<Self, TransitionError> {
        match self {
            Self::Submitted => Ok(Self::Returned),
            current => Err(TransitionError {
                current,
                required: Self::Returned,
            }),
        }
    }

    /// Decide an acceptance. Legal only from `Submitted`; terminal.
    pub fn accept(self) -> Result<Self, TransitionError> {
        match self {
            Self::Submitted => Ok(Self::Accepted),
            current => Err(TransitionError {
                current,
                required: Self::Accepted,
            }),
        }
    }
}

impl std::fmt::Display for TaxFormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Submitted => "SUBMITTED",
            Self::Returned => "RETURNED",
            Self::Accepted => "ACCEPTED",
        };
        f.write_str(s)
    }
}

// ─── History Events ─────────────────────────────────────────────────

/// Audit event recorded for a successful workflow transition.
///
/// Only submit, return, and accept produce history entries; edits never
/// do. `NotStarted` and `InProgress` therefore never appear in a form's
/// audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEvent {
    /// Form was submitted for review.
    Submitted,
    /// Form was returned for rework.
    Returned,
    /// Form was accepted.
    Accepted,
}

impl std::fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Submitted => "SUBMITTED",
            Self::Returned => "RETURNED",
            Self::Accepted => "ACCEPTED",
        };
        f.write_str(s)
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// A workflow action was requested from a status that does not permit it.
///
/// `required` is the target status of the attempted action; together with
/// `current` it carries enough for a caller to render a conflict message.
/// Deciding the same illegal action twice yields the same pair both times.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("tax form is in {current} status, must be in {required} status")]
pub struct TransitionError {
    /// Status the form was in when the action was attempted.
    pub current: TaxFormStatus,
    /// Target status of the attempted action.
    pub required: TaxFormStatus,
}

// ─── Tests ──────────────────────────────────────────────────────────
