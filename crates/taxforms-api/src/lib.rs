//! # taxforms-api — Axum HTTP Surface
//!
//! Thin HTTP layer over `taxforms-workflow`, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `GET   /forms?year=YYYY` — list forms for an assessment year
//! - `POST  /forms` — create a form
//! - `GET   /forms/{id}` — fetch one form with its audit history
//! - `PATCH /forms/{id}` — save details (edit)
//! - `PATCH /forms/{id}/submit` — submit for review
//! - `PATCH /forms/{id}/return` — return for rework
//! - `PATCH /forms/{id}/accept` — accept (terminal)
//! - `GET   /health` — liveness probe (unauthenticated)
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers: transition rules live in
//!   `taxforms-core`, orchestration in `taxforms-workflow`.
//! - All errors map to structured HTTP responses via [`AppError`]:
//!   missing form → 404, illegal transition → 409, malformed details
//!   → 422, store fault → 500.
//! - Wire field names are camelCase (`formYear`, `assessedValue`, …).

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::forms::router())
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
