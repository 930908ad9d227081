//! # Form Routes
//!
//! Routes:
//! - `GET   /forms?year=YYYY` — list forms for a year
//! - `POST  /forms` — create a form
//! - `GET   /forms/{id}` — fetch one form
//! - `PATCH /forms/{id}` — save details
//! - `PATCH /forms/{id}/submit` — submit for review
//! - `PATCH /forms/{id}/return` — return for rework
//! - `PATCH /forms/{id}/accept` — accept

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;

use taxforms_core::FormId;

use crate::dto::{CreateTaxFormRequest, TaxFormDetailsRequest, TaxFormDto};
use crate::error::AppError;
use crate::state::AppState;

/// Router for the `/forms` surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forms", get(find_all_by_year).post(create))
        .route("/forms/{id}", get(find_by_id).patch(save))
        .route("/forms/{id}/submit", patch(submit))
        .route("/forms/{id}/return", patch(return_form))
        .route("/forms/{id}/accept", patch(accept))
}

#[derive(Debug, Deserialize)]
struct YearParam {
    year: u16,
}

async fn find_all_by_year(
    State(state): State<AppState>,
    Query(params): Query<YearParam>,
) -> Result<Json<Vec<TaxFormDto>>, AppError> {
    let forms = state.service.find_all_by_year(params.year)?;
    Ok(Json(forms.into_iter().map(TaxFormDto::from).collect()))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateTaxFormRequest>,
) -> Result<(StatusCode, Json<TaxFormDto>), AppError> {
    let form = state.service.create(request.validate()?)?;
    Ok((StatusCode::CREATED, Json(form.into())))
}

async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<FormId>,
) -> Result<Json<TaxFormDto>, AppError> {
    let form = state.service.find_by_id(id)?;
    Ok(Json(form.into()))
}

async fn save(
    State(state): State<AppState>,
    Path(id): Path<FormId>,
    Json(request): Json<TaxFormDetailsRequest>,
) -> Result<Json<TaxFormDto>, AppError> {
    let form = state.service.save(id, request.validate()?)?;
    Ok(Json(form.into()))
}

async fn submit(
    State(state): State<AppState>,
    Path(id): Path<FormId>,
) -> Result<Json<TaxFormDto>, AppError> {
    let form = state.service.submit(id)?;
    Ok(Json(form.into()))
}

async fn return_form(
    State(state): State<AppState>,
    Path(id): Path<FormId>,
) -> Result<Json<TaxFormDto>, AppError> {
    let form = state.service.return_form(id)?;
    Ok(Json(form.into()))
}

async fn accept(
    State(state): State<AppState>,
    Path(id): Path<FormId>,
) -> Result<Json<TaxFormDto>, AppError> {
    let form = state.service.accept(id)?;
    Ok(Json(form.into()))
}
