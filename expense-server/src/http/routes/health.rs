//! Health check endpoint

use axum::{routing::get, Json, Router};
use chrono::{Local, SecondsFormat};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Health routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
