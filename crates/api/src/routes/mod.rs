pub mod auth;
pub mod bills;
pub mod health;
pub mod kot;
pub mod menu;
pub mod metrics;
pub mod orders;
pub mod reports;
pub mod ws;

use crate::error::ApiError;

/// Any path no route claims.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
