//! # taxforms-api Entry Point
//!
//! Initializes tracing, binds the listener, and serves the application
//! router. The bind address comes from `TAXFORMS_ADDR` (default
//! `0.0.0.0:8080`).

use taxforms_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let addr = std::env::var("TAXFORMS_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "tax forms API listening");

    axum::serve(listener, app(AppState::new())).await?;
    Ok(())
}
