//! Order submission and kitchen lifecycle endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use common::{ItemId, OrderId, UserId};
use domain::{
    AdvanceStatus, CancelItem, Money, NewOrderItem, Order, OrderKind, OrderStatus, SubmitOrder,
    TableNumber,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    #[serde(default)]
    pub table_number: Option<TableLabel>,
    #[serde(default)]
    pub order_type: Option<OrderKind>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cashier_id: Option<UserId>,
}

/// Screens send table numbers both as text and as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum TableLabel {
    Text(String),
    Number(u64),
}

impl From<TableLabel> for String {
    fn from(label: TableLabel) -> Self {
        match label {
            TableLabel::Text(text) => text,
            TableLabel::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub quantity: i64,
}

impl SubmitOrderRequest {
    fn into_command(self) -> SubmitOrder {
        let table_number = self.table_number.map(String::from);
        // older screens mark takeaway only through the table label
        let order_type = self.order_type.unwrap_or_else(|| {
            if table_number.as_deref() == Some(TableNumber::TAKEAWAY) {
                OrderKind::Takeaway
            } else {
                OrderKind::DineIn
            }
        });

        SubmitOrder {
            table_number,
            order_type,
            items: self
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    id: item.id,
                    name: item.name,
                    category: item.category,
                    price: item.price,
                    quantity: item.quantity,
                    status: None,
                })
                .collect(),
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            cashier_id: self.cashier_id,
        }
    }
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct SubmitOrderResponse {
    pub success: bool,
    pub order: Order,
    /// Milliseconds.
    pub latency: u64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            success: true,
            order,
        }
    }
}

fn parse_status(raw: &str) -> Result<OrderStatus, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid status: {raw}")))
}

// -- Handlers --

/// POST /api/orders: submit a new order and notify the kitchen.
#[tracing::instrument(skip(state, req))]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SubmitOrderRequest>,
) -> Result<Json<SubmitOrderResponse>, ApiError> {
    let submitted = state.orders.submit(req.into_command()).await?;

    Ok(Json(SubmitOrderResponse {
        success: true,
        order: submitted.order,
        latency: submitted.latency_ms,
    }))
}

/// GET /api/orders?status=: all orders, oldest first.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    Ok(Json(state.orders.list(status).await))
}

/// GET /api/orders/{id}: one order, for screens catching up after a reconnect.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get(id).await?))
}

/// PUT /api/orders/{id}/status: kitchen status change.
#[tracing::instrument(skip(state, req))]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let status = parse_status(&req.status)?;
    let order = state
        .orders
        .advance_status(AdvanceStatus::new(id, status))
        .await?;
    Ok(Json(order.into()))
}

/// PUT /api/orders/{order_id}/items/{item_id}/cancel: cancel one line item.
#[tracing::instrument(skip(state))]
pub async fn cancel_item(
    State(state): State<Arc<AppState>>,
    Path((order_id, item_id)): Path<(OrderId, ItemId)>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .orders
        .cancel_item(CancelItem::new(order_id, item_id))
        .await?;
    Ok(Json(order.into()))
}

/// PUT /api/orders/{id}/kot-printed: the kitchen printed the ticket.
#[tracing::instrument(skip(state))]
pub async fn kot_printed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.mark_kot_printed(id).await?;
    Ok(Json(order.into()))
}
