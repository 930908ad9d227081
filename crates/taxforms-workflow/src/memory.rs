//! # In-Memory Store
//!
//! [`TaxFormStore`] backed by a mutex-guarded map. Every trait method runs
//! in one critical section, which stands in for the row-level transaction
//! isolation a database backend would provide: a status update and its
//! history append are never observable separately.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use taxforms_core::{
    FormId, HistoryEvent, NewTaxForm, TaxForm, TaxFormHistoryEntry, TaxFormStatus,
};

use crate::store::{StoreError, TaxFormStore};

#[derive(Debug, Default)]
struct Inner {
    next_form_id: FormId,
    next_history_id: i32,
    forms: BTreeMap<FormId, TaxForm>,
}

/// An in-memory [`TaxFormStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-write; the store contents can
        // no longer be trusted, so the panic propagates.
        self.inner.lock().expect("tax form store lock poisoned")
    }
}

impl TaxFormStore for MemoryStore {
    fn create(&self, new_form: NewTaxForm) -> Result<TaxForm, StoreError> {
        let mut inner = self.lock();
        inner.next_form_id += 1;
        let now = Utc::now();
        let form = TaxForm {
            id: inner.next_form_id,
            form_year: new_form.form_year,
            form_name: new_form.form_name,
            status: TaxFormStatus::NotStarted,
            details: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        inner.forms.insert(form.id, form.clone());
        Ok(form)
    }

    fn get(&self, id: FormId) -> Result<Option<TaxForm>, StoreError> {
        Ok(self.lock().forms.get(&id).cloned())
    }

    fn put(&self, mut form: TaxForm) -> Result<TaxForm, StoreError> {
        let mut inner = self.lock();
        let (created_at, history, prev_updated) = match inner.forms.get(&form.id) {
            Some(row) => (row.created_at, row.history.clone(), row.updated_at),
            None => return Err(StoreError::MissingRow(form.id)),
        };
        // created_at is immutable and the history log is store-owned on
        // plain puts; whatever the caller carried is discarded.
        form.created_at = created_at;
        form.history = history;
        form.updated_at = next_timestamp(prev_updated);
        inner.forms.insert(form.id, form.clone());
        Ok(form)
    }

    fn put_with_history(
        &self,
        mut form: TaxForm,
        event: HistoryEvent,
    ) -> Result<TaxForm, StoreError> {
        let mut inner = self.lock();
        let (created_at, mut history, prev_updated) = match inner.forms.get(&form.id) {
            Some(row) => (row.created_at, row.history.clone(), row.updated_at),
            None => return Err(StoreError::MissingRow(form.id)),
        };
        let now = next_timestamp(prev_updated);
        inner.next_history_id += 1;
        history.push(TaxFormHistoryEntry {
            id: inner.next_history_id,
            form_id: form.id,
            event,
            created_at: now,
        });
        form.created_at = created_at;
        form.history = history;
        form.updated_at = now;
        inner.forms.insert(form.id, form.clone());
        Ok(form)
    }

    fn list_by_year(&self, year: u16) -> Result<Vec<TaxForm>, StoreError> {
        Ok(self
            .lock()
            .forms
            .values()
            .filter(|form| form.form_year == year)
            .cloned()
            .collect())
    }
}

/// Update timestamps never move backwards, even if the wall clock does.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

// ─── Tests ──────────────────────────────────────────────────────────
