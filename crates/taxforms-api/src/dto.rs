//! # Transfer Representations
//!
//! Wire-facing request and response types. Field names are camelCase on
//! the wire; responses are built from store records with `From` impls.
//! Request validation here is a pure data-shape concern; workflow rules
//! never live in this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taxforms_core::{
    FormId, HistoryEvent, NewTaxForm, TaxForm, TaxFormDetails, TaxFormHistoryEntry, TaxFormStatus,
};

use crate::error::AppError;

// ─── Field limits ───────────────────────────────────────────────────

const MAX_ASSESSED_VALUE: u32 = 100_000;
const MAX_APPRAISED_VALUE: u64 = 100_000;
const MAX_COMMENT_CHARS: usize = 500;

// ─── Responses ──────────────────────────────────────────────────────

/// Response body for a tax form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxFormDto {
    pub id: FormId,
    pub form_year: u16,
    pub form_name: String,
    pub status: TaxFormStatus,
    pub details: Option<TaxFormDetailsDto>,
    pub history: Vec<TaxFormHistoryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Detail payload as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxFormDetailsDto {
    pub assessed_value: u32,
    pub appraised_value: Option<u64>,
    pub ratio: f64,
    pub comments: Option<String>,
}

/// One audit-history entry as rendered on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxFormHistoryDto {
    pub tax_form_id: FormId,
    #[serde(rename = "type")]
    pub event: HistoryEvent,
    pub created_at: DateTime<Utc>,
}

impl From<TaxForm> for TaxFormDto {
    fn from(form: TaxForm) -> Self {
        Self {
            id: form.id,
            form_year: form.form_year,
            form_name: form.form_name,
            status: form.status,
            details: form.details.map(TaxFormDetailsDto::from),
            history: form.history.into_iter().map(TaxFormHistoryDto::from).collect(),
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }
}

impl From<TaxFormDetails> for TaxFormDetailsDto {
    fn from(details: TaxFormDetails) -> Self {
        Self {
            assessed_value: details.assessed_value,
            appraised_value: details.appraised_value,
            ratio: details.ratio,
            comments: details.comments,
        }
    }
}

impl From<TaxFormHistoryEntry> for TaxFormHistoryDto {
    fn from(entry: TaxFormHistoryEntry) -> Self {
        Self {
            tax_form_id: entry.form_id,
            event: entry.event,
            created_at: entry.created_at,
        }
    }
}

// ─── Requests ───────────────────────────────────────────────────────

/// Body for `POST /forms`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaxFormRequest {
    pub form_year: u16,
    pub form_name: String,
}

impl CreateTaxFormRequest {
    pub fn validate(self) -> Result<NewTaxForm, AppError> {
        if self.form_name.trim().is_empty() {
            return Err(AppError::Validation("formName must not be blank".to_string()));
        }
        Ok(NewTaxForm {
            form_year: self.form_year,
            form_name: self.form_name,
        })
    }
}

/// Body for `PATCH /forms/{id}` — the editable detail payload.
///
/// Required fields are modeled as `Option` so that a missing field gets a
/// named validation error rather than a bare deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxFormDetailsRequest {
    pub assessed_value: Option<u32>,
    pub appraised_value: Option<u64>,
    pub ratio: Option<f64>,
    pub comments: Option<String>,
}

impl TaxFormDetailsRequest {
    pub fn validate(self) -> Result<TaxFormDetails, AppError> {
        let assessed_value = self
            .assessed_value
            .ok_or_else(|| AppError::Validation("assessedValue is required".to_string()))?;
        if assessed_value > MAX_ASSESSED_VALUE {
            return Err(AppError::Validation(format!(
                "assessedValue must not exceed {MAX_ASSESSED_VALUE}"
            )));
        }
        if let Some(appraised_value) = self.appraised_value {
            if appraised_value > MAX_APPRAISED_VALUE {
                return Err(AppError::Validation(format!(
                    "appraisedValue must not exceed {MAX_APPRAISED_VALUE}"
                )));
            }
        }
        let ratio = self
            .ratio
            .ok_or_else(|| AppError::Validation("ratio is required".to_string()))?;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(AppError::Validation(
                "ratio must be between 0.0 and 1.0".to_string(),
            ));
        }
        if let Some(comments) = &self.comments {
            if comments.chars().count() > MAX_COMMENT_CHARS {
                return Err(AppError::Validation(format!(
                    "comments must not exceed {MAX_COMMENT_CHARS} characters"
                )));
            }
        }
        Ok(TaxFormDetails {
            assessed_value,
            appraised_value: self.appraised_value,
            ratio,
            comments: self.comments,
        })
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
