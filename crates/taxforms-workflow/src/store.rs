//! # Record Store Contract
//!
//! The persistence boundary the workflow depends on: a transactional
//! record store keyed by form id. `put_with_history` is the transactional
//! unit for audited transitions: implementations must persist the form
//! update and the history append together or not at all.

use taxforms_core::{FormId, HistoryEvent, NewTaxForm, TaxForm};
use thiserror::Error;

/// Faults raised by the persistence layer.
///
/// These are not recoverable workflow outcomes. Callers propagate them
/// without retrying; the HTTP boundary maps them to a generic server
/// error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A write referenced a form row that no longer exists.
    #[error("tax form row {0} has vanished from the store")]
    MissingRow(FormId),
}

/// Durable storage for tax form records and their audit history.
///
/// Implementations must serialize concurrent writers to the same form so
/// that a reader observes either the pre-transition or the fully
/// post-transition record, never an intermediate one. History is
/// append-only: plain `put` calls never alter the stored log.
pub trait TaxFormStore: Send + Sync {
    /// Insert a new form. Assigns the id and timestamps; the form starts
    /// in `NotStarted` status with no details and no history.
    fn create(&self, new_form: NewTaxForm) -> Result<TaxForm, StoreError>;

    /// Load a form with its history, ordered oldest-first.
    fn get(&self, id: FormId) -> Result<Option<TaxForm>, StoreError>;

    /// Persist an updated form, bumping `updated_at`. Does not touch
    /// history.
    fn put(&self, form: TaxForm) -> Result<TaxForm, StoreError>;

    /// Persist an updated form and append exactly one history entry, as
    /// a single atomic unit. Returns the form with the new entry at the
    /// end of its history.
    fn put_with_history(&self, form: TaxForm, event: HistoryEvent)
        -> Result<TaxForm, StoreError>;

    /// All forms for the given year, in no particular order.
    fn list_by_year(&self, year: u16) -> Result<Vec<TaxForm>, StoreError>;
}
