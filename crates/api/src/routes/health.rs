//! Health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
}

/// Build the root-level health router (outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
///
/// Liveness plus a database round-trip.
async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    ucampus_db::health_check(&state.pool).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        database: "reachable",
    }))
}
