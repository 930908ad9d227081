//! # taxforms-core — Tax Form Domain Types
//!
//! Foundational types for the tax form approval workflow: the form and
//! audit-history records, the five-state lifecycle status, and the pure
//! transition policy that decides which status changes are legal.
//!
//! ## Crate Policy
//!
//! - Transition decisions are pure functions over the current status: no
//!   I/O, no clocks beyond the timestamp fields carried on records.
//! - Persistence and orchestration live in `taxforms-workflow`; wire
//!   representations live in `taxforms-api`.

pub mod form;
pub mod status;

// ─── Form re-exports ────────────────────────────────────────────────

pub use form::{FormId, NewTaxForm, TaxForm, TaxFormDetails, TaxFormHistoryEntry};

// ─── Status re-exports ──────────────────────────────────────────────

pub use status::{HistoryEvent, TaxFormStatus, TransitionError};
