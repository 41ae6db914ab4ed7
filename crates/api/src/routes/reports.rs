//! Report endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use chrono::NaiveDate;
use reports::DailySalesReport;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    /// `YYYY-MM-DD`; today (UTC) when absent.
    pub date: Option<String>,
}

/// GET /api/reports/daily?date=: sales rollup for one day.
#[tracing::instrument(skip(state))]
pub async fn daily(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<DailySalesReport>, ApiError> {
    let date = query
        .date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ApiError::BadRequest(format!("Invalid date: {raw}")))
        })
        .transpose()?;
    Ok(Json(state.reports.daily(date).await))
}
