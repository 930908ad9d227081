//! # Tax Form Workflow Service
//!
//! Orchestrates the workflow operations: load the form, apply the pure
//! status policy, persist the outcome. The audited transitions (submit,
//! return, accept) persist the status change and exactly one history
//! entry through a single atomic store operation; saves persist the form
//! alone and never touch history.
//!
//! On rejection nothing is written; the stored form, including its
//! history, is left exactly as it was.

use taxforms_core::{
    FormId, HistoryEvent, NewTaxForm, TaxForm, TaxFormDetails, TaxFormStatus, TransitionError,
};
use thiserror::Error;

use crate::store::{StoreError, TaxFormStore};

// ─── Errors ─────────────────────────────────────────────────────────

/// Recoverable workflow outcomes, plus propagated store faults.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// No form exists with the requested id.
    #[error("no tax form found with id {0}")]
    NotFound(FormId),

    /// The requested action is illegal from the form's current status.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// The persistence layer failed. Not retried here; the boundary maps
    /// this to a generic server error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ─── Service ────────────────────────────────────────────────────────

/// The workflow service, generic over its record store.
#[derive(Debug)]
pub struct TaxFormService<S> {
    store: S,
}

impl<S: TaxFormStore> TaxFormService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new form in `NotStarted` status.
    pub fn create(&self, new_form: NewTaxForm) -> Result<TaxForm, WorkflowError> {
        let form = self.store.create(new_form)?;
        tracing::info!(
            form_id = form.id,
            form_year = form.form_year,
            "created tax form"
        );
        Ok(form)
    }

    /// All forms for the given year; empty if none.
    pub fn find_all_by_year(&self, year: u16) -> Result<Vec<TaxForm>, WorkflowError> {
        Ok(self.store.list_by_year(year)?)
    }

    /// Look up one form by id.
    pub fn find_by_id(&self, id: FormId) -> Result<TaxForm, WorkflowError> {
        self.store.get(id)?.ok_or(WorkflowError::NotFound(id))
    }

    /// Replace the form's details, moving it to `InProgress`.
    ///
    /// Edits are not audited: the history log is left untouched.
    pub fn save(&self, id: FormId, details: TaxFormDetails) -> Result<TaxForm, WorkflowError> {
        let mut form = self.find_by_id(id)?;
        form.status = decide(&form, TaxFormStatus::save)?;
        form.details = Some(details);
        let form = self.store.put(form)?;
        tracing::info!(form_id = id, status = %form.status, "saved tax form details");
        Ok(form)
    }

    /// Submit the form for review. Audited.
    pub fn submit(&self, id: FormId) -> Result<TaxForm, WorkflowError> {
        self.transition(id, TaxFormStatus::submit, HistoryEvent::Submitted)
    }

    /// Return a submitted form for rework. Audited.
    pub fn return_form(&self, id: FormId) -> Result<TaxForm, WorkflowError> {
        self.transition(id, TaxFormStatus::return_form, HistoryEvent::Returned)
    }

    /// Accept a submitted form. Audited; terminal.
    pub fn accept(&self, id: FormId) -> Result<TaxForm, WorkflowError> {
        self.transition(id, TaxFormStatus::accept, HistoryEvent::Accepted)
    }

    /// Shared shape of the audited transitions: load, decide, then
    /// persist the new status together with exactly one history entry.
    fn transition(
        &self,
        id: FormId,
        decide_fn: fn(TaxFormStatus) -> Result<TaxFormStatus, TransitionError>,
        event: HistoryEvent,
    ) -> Result<TaxForm, WorkflowError> {
        let mut form = self.find_by_id(id)?;
        form.status = decide(&form, decide_fn)?;
        let form = self.store.put_with_history(form, event)?;
        tracing::info!(
            form_id = id,
            status = %form.status,
            event = %event,
            "applied tax form transition"
        );
        Ok(form)
    }
}

/// Apply a policy decision, logging rejections with the (current,
/// required) pair the caller will surface.
fn decide(
    form: &TaxForm,
    decide_fn: fn(TaxFormStatus) -> Result<TaxFormStatus, TransitionError>,
) -> Result<TaxFormStatus, TransitionError> {
    match decide_fn(form.status) {
        Ok(next) => Ok(next),
        Err(err) => {
            tracing::warn!(
                form_id = form.id,
                current = %err.current,
                required = %err.required,
                "rejected tax form transition"
            );
            Err(err)
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn service() -> TaxFormService<MemoryStore> {
        TaxFormService::new(MemoryStore::new())
    }

    fn new_form() -> NewTaxForm {
        NewTaxForm {
            form_year: 2024,
            form_name: "Test Form 1".to_string(),
        }
    }

    fn details() -> TaxFormDetails {
        TaxFormDetails {
            assessed_value: 100,
            appraised_value: Some(200),
            ratio: 0.5,
            comments: Some("Testing".to_string()),
        }
    }

    /// Drive a fresh form to the requested status through the workflow
    /// itself, returning its id.
    fn form_in(service: &TaxFormService<MemoryStore>, status: TaxFormStatus) -> FormId {
        let id = service.create(new_form()).unwrap().id;
        match status {
            TaxFormStatus::NotStarted => {}
            TaxFormStatus::InProgress => {
                service.save(id, details()).unwrap();
            }
            TaxFormStatus::Submitted => {
                service.save(id, details()).unwrap();
                service.submit(id).unwrap();
            }
            TaxFormStatus::Returned => {
                service.save(id, details()).unwrap();
                service.submit(id).unwrap();
                service.return_form(id).unwrap();
            }
            TaxFormStatus::Accepted => {
                service.save(id, details()).unwrap();
                service.submit(id).unwrap();
                service.accept(id).unwrap();
            }
        }
        assert_eq!(service.find_by_id(id).unwrap().status, status);
        id
    }

    // ── create / find ───────────────────────────────────────────────

    #[test]
    fn test_create_starts_not_started() {
        let service = service();
        let form = service.create(new_form()).unwrap();
        assert_eq!(form.status, TaxFormStatus::NotStarted);
        assert!(form.details.is_none());
        assert!(form.history.is_empty());
    }

    #[test]
    fn test_find_all_by_year() {
        let service = service();
        let form = service.create(new_form()).unwrap();
        service
            .create(NewTaxForm {
                form_year: 2025,
                form_name: "Test Form 2".to_string(),
            })
            .unwrap();

        let found = service.find_all_by_year(2024).unwrap();
        assert_eq!(found, vec![form]);
        assert!(service.find_all_by_year(2023).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let service = service();
        let form = service.create(new_form()).unwrap();
        assert_eq!(service.find_by_id(form.id).unwrap(), form);
        assert!(matches!(
            service.find_by_id(0).unwrap_err(),
            WorkflowError::NotFound(0)
        ));
    }

    // ── save ────────────────────────────────────────────────────────

    #[test]
    fn test_save_sets_details_and_status() {
        let service = service();
        let id = service.create(new_form()).unwrap().id;
        let form = service.save(id, details()).unwrap();
        assert_eq!(form.status, TaxFormStatus::InProgress);
        assert_eq!(form.details, Some(details()));
        assert!(form.history.is_empty());
    }

    #[test]
    fn test_save_not_found() {
        let service = service();
        assert!(matches!(
            service.save(0, details()).unwrap_err(),
            WorkflowError::NotFound(0)
        ));
    }

    #[test]
    fn test_save_rejected_statuses() {
        for status in [TaxFormStatus::Submitted, TaxFormStatus::Accepted] {
            let service = service();
            let id = form_in(&service, status);
            let before = service.find_by_id(id).unwrap();

            let err = service.save(id, details()).unwrap_err();
            match err {
                WorkflowError::InvalidTransition(err) => {
                    assert_eq!(err.current, status);
                    assert_eq!(err.required, TaxFormStatus::InProgress);
                }
                other => panic!("expected InvalidTransition, got: {other:?}"),
            }
            // No partial write.
            assert_eq!(service.find_by_id(id).unwrap(), before);
        }
    }

    #[test]
    fn test_save_never_touches_history() {
        let service = service();
        let id = form_in(&service, TaxFormStatus::Returned);
        let history_before = service.find_by_id(id).unwrap().history;
        assert_eq!(history_before.len(), 2);

        let form = service.save(id, details()).unwrap();
        assert_eq!(form.status, TaxFormStatus::InProgress);
        assert_eq!(form.history, history_before);
    }

    // ── submit ──────────────────────────────────────────────────────

    #[test]
    fn test_submit_success() {
        let service = service();
        let id = form_in(&service, TaxFormStatus::InProgress);
        let form = service.submit(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::Submitted);
        assert_eq!(form.history.len(), 1);
        assert_eq!(form.history[0].event, HistoryEvent::Submitted);

        // Stored record agrees with the returned one.
        assert_eq!(service.find_by_id(id).unwrap(), form);
    }

    #[test]
    fn test_submit_rejected_statuses() {
        for status in [
            TaxFormStatus::NotStarted,
            TaxFormStatus::Submitted,
            TaxFormStatus::Returned,
            TaxFormStatus::Accepted,
        ] {
            let service = service();
            let id = form_in(&service, status);
            let before = service.find_by_id(id).unwrap();

            match service.submit(id).unwrap_err() {
                WorkflowError::InvalidTransition(err) => {
                    assert_eq!(err.current, status);
                    assert_eq!(err.required, TaxFormStatus::Submitted);
                }
                other => panic!("expected InvalidTransition, got: {other:?}"),
            }
            assert_eq!(service.find_by_id(id).unwrap(), before);
        }
    }

    #[test]
    fn test_submit_not_found() {
        let service = service();
        assert!(matches!(
            service.submit(0).unwrap_err(),
            WorkflowError::NotFound(0)
        ));
    }

    // ── return ──────────────────────────────────────────────────────

    #[test]
    fn test_return_form_success() {
        let service = service();
        let id = form_in(&service, TaxFormStatus::Submitted);
        let form = service.return_form(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::Returned);
        assert_eq!(form.history.len(), 2);
        assert_eq!(form.last_event(), Some(HistoryEvent::Returned));
    }

    #[test]
    fn test_return_form_rejected_statuses() {
        for status in [
            TaxFormStatus::NotStarted,
            TaxFormStatus::InProgress,
            TaxFormStatus::Returned,
            TaxFormStatus::Accepted,
        ] {
            let service = service();
            let id = form_in(&service, status);
            let before = service.find_by_id(id).unwrap();

            match service.return_form(id).unwrap_err() {
                WorkflowError::InvalidTransition(err) => {
                    assert_eq!(err.current, status);
                    assert_eq!(err.required, TaxFormStatus::Returned);
                }
                other => panic!("expected InvalidTransition, got: {other:?}"),
            }
            assert_eq!(service.find_by_id(id).unwrap(), before);
        }
    }

    #[test]
    fn test_return_form_not_found() {
        let service = service();
        assert!(matches!(
            service.return_form(0).unwrap_err(),
            WorkflowError::NotFound(0)
        ));
    }

    // ── accept ──────────────────────────────────────────────────────

    #[test]
    fn test_accept_success() {
        let service = service();
        let id = form_in(&service, TaxFormStatus::Submitted);
        let form = service.accept(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::Accepted);
        assert_eq!(form.history.len(), 2);
        assert_eq!(form.last_event(), Some(HistoryEvent::Accepted));
    }

    #[test]
    fn test_accept_rejected_statuses() {
        for status in [
            TaxFormStatus::NotStarted,
            TaxFormStatus::InProgress,
            TaxFormStatus::Returned,
            TaxFormStatus::Accepted,
        ] {
            let service = service();
            let id = form_in(&service, status);
            let before = service.find_by_id(id).unwrap();

            match service.accept(id).unwrap_err() {
                WorkflowError::InvalidTransition(err) => {
                    assert_eq!(err.current, status);
                    assert_eq!(err.required, TaxFormStatus::Accepted);
                }
                other => panic!("expected InvalidTransition, got: {other:?}"),
            }
            assert_eq!(service.find_by_id(id).unwrap(), before);
        }
    }

    #[test]
    fn test_accept_not_found() {
        let service = service();
        assert!(matches!(
            service.accept(0).unwrap_err(),
            WorkflowError::NotFound(0)
        ));
    }

    // ── end-to-end lifecycle ────────────────────────────────────────

    #[test]
    fn test_full_lifecycle() {
        let service = service();
        let id = service.create(new_form()).unwrap().id;

        let form = service.save(id, details()).unwrap();
        assert_eq!(form.status, TaxFormStatus::InProgress);
        assert!(form.history.is_empty());

        let form = service.submit(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::Submitted);
        assert_eq!(form.history.len(), 1);

        let form = service.return_form(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::Returned);
        assert_eq!(form.history.len(), 2);

        // Rework after a return: save moves the form back to editing and
        // leaves the audit log alone.
        let form = service.save(id, details()).unwrap();
        assert_eq!(form.status, TaxFormStatus::InProgress);
        assert_eq!(form.history.len(), 2);

        let form = service.submit(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::Submitted);
        assert_eq!(form.history.len(), 3);

        let form = service.accept(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::Accepted);

        let events: Vec<HistoryEvent> = form.history.iter().map(|entry| entry.event).collect();
        assert_eq!(
            events,
            vec![
                HistoryEvent::Submitted,
                HistoryEvent::Returned,
                HistoryEvent::Submitted,
                HistoryEvent::Accepted,
            ]
        );
        // Entry order matches call order.
        for pair in form.history.windows(2) {
            assert!(pair[0].id < pair[1].id);
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let service = service();
        let id = form_in(&service, TaxFormStatus::NotStarted);

        let first = service.submit(id).unwrap_err();
        let second = service.submit(id).unwrap_err();
        match (first, second) {
            (
                WorkflowError::InvalidTransition(first),
                WorkflowError::InvalidTransition(second),
            ) => {
                assert_eq!(first, second);
                assert_eq!(first.current, TaxFormStatus::NotStarted);
                assert_eq!(first.required, TaxFormStatus::Submitted);
            }
            other => panic!("expected two InvalidTransition errors, got: {other:?}"),
        }

        let form = service.find_by_id(id).unwrap();
        assert_eq!(form.status, TaxFormStatus::NotStarted);
        assert!(form.history.is_empty());
    }
}
