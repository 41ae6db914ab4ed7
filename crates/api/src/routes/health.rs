//! Health check endpoint.

use axum::Json;
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /health: returns system health status.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().trunc_subsecs(3),
    })
}
