//! KOT log endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use domain::kot::DEFAULT_RECENT_LIMIT;
use domain::{KotLogEntry, KotStats};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

/// GET /api/logs/kot?limit=: most recent entries, oldest first.
pub async fn logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogsQuery>,
) -> Json<Vec<KotLogEntry>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    Json(state.orders.kot().recent(limit).await)
}

/// GET /api/logs/kot/stats: latency and success figures over the whole log.
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<KotStats> {
    Json(state.orders.kot().stats().await)
}
