//! Billing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::OrderId;
use domain::Bill;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    pub order_id: OrderId,
}

#[derive(Serialize)]
pub struct BillResponse {
    pub success: bool,
    pub bill: Bill,
}

/// POST /api/bills: settle an order.
#[tracing::instrument(skip(state, req), fields(order_id = %req.order_id))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateBillRequest>,
) -> Result<Json<BillResponse>, ApiError> {
    let bill = state.billing.finalize(req.order_id).await?;
    Ok(Json(BillResponse {
        success: true,
        bill,
    }))
}

/// GET /api/bills: every bill issued so far.
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Bill>> {
    Json(state.billing.bills().await)
}
