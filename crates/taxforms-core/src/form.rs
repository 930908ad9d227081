//! # Form Records
//!
//! The tax form record, its editable detail payload, and the append-only
//! audit history the form owns. The store assigns identifiers and manages
//! timestamps; the workflow service is the only writer of the history
//! collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{HistoryEvent, TaxFormStatus};

/// Identifier for a tax form record, assigned by the store on insert.
pub type FormId = i32;

// ─── Details ────────────────────────────────────────────────────────

/// Detail payload captured while a form is editable.
///
/// Field-level limits are enforced at the API boundary; the workflow
/// replaces the whole payload on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxFormDetails {
    pub assessed_value: u32,
    pub appraised_value: Option<u64>,
    pub ratio: f64,
    pub comments: Option<String>,
}

// ─── History ────────────────────────────────────────────────────────

/// Append-only audit record of one successful workflow transition.
///
/// Entries are never updated or deleted, and cannot outlive their form.
/// Order within a form's history reflects the order transitions were
/// applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxFormHistoryEntry {
    pub id: i32,
    pub form_id: FormId,
    pub event: HistoryEvent,
    pub created_at: DateTime<Utc>,
}

// ─── Form ───────────────────────────────────────────────────────────

/// One year's tax assessment form with its lifecycle status and audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxForm {
    pub id: FormId,
    pub form_year: u16,
    pub form_name: String,
    pub status: TaxFormStatus,
    /// `None` until the first save.
    pub details: Option<TaxFormDetails>,
    /// Ordered oldest-first.
    pub history: Vec<TaxFormHistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaxForm {
    /// The most recent audit event, if any transition has been logged.
    pub fn last_event(&self) -> Option<HistoryEvent> {
        self.history.last().map(|entry| entry.event)
    }
}

/// Input for creating a form; the store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaxForm {
    pub form_year: u16,
    pub form_name: String,
}

// ─── Tests ──────────────────────────────────────────────────────────
