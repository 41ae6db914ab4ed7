//! Menu endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::MenuItemId;
use domain::{MenuItem, MenuItemPatch, NewMenuItem};
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MenuItemResponse {
    pub success: bool,
    pub item: MenuItem,
}

/// GET /api/menu: dishes available to order.
pub async fn enabled(State(state): State<Arc<AppState>>) -> Json<Vec<MenuItem>> {
    Json(state.menu.enabled().await)
}

/// GET /api/menu/all: the whole menu, disabled dishes included.
pub async fn all(State(state): State<Arc<AppState>>) -> Json<Vec<MenuItem>> {
    Json(state.menu.all().await)
}

/// POST /api/menu: add a dish.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewMenuItem>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let item = state.menu.add(req).await?;
    Ok(Json(MenuItemResponse {
        success: true,
        item,
    }))
}

/// PUT /api/menu/{id}: edit or disable a dish.
#[tracing::instrument(skip(state, patch))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MenuItemId>,
    JsonBody(patch): JsonBody<MenuItemPatch>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let item = state.menu.update(id, patch).await?;
    Ok(Json(MenuItemResponse {
        success: true,
        item,
    }))
}
