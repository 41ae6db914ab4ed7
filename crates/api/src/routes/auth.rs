//! Staff login.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::UserProfile;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub pin: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// POST /api/login: checks a mobile number and pin.
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state.users.authenticate(&req.mobile, &req.pin).await {
        Some(user) => {
            tracing::info!(user_id = %user.id, role = ?user.role, "login succeeded");
            Ok(Json(LoginResponse {
                success: true,
                user,
            }))
        }
        None => {
            tracing::warn!("login failed");
            Err(ApiError::Unauthorized("Invalid credentials".to_string()))
        }
    }
}
