//! HTTP and WebSocket server for the restaurant POS.
//!
//! Provides REST endpoints for ordering, kitchen status, billing, KOT logs,
//! reports, menu and login, a WebSocket channel for realtime screen updates,
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, LogFormat};
pub use error::ApiError;
pub use state::{AppState, create_default_state, create_state};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let api = Router::new()
        .route("/orders", post(routes::orders::submit).get(routes::orders::list))
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/status", put(routes::orders::update_status))
        .route(
            "/orders/{order_id}/items/{item_id}/cancel",
            put(routes::orders::cancel_item),
        )
        .route("/orders/{id}/kot-printed", put(routes::orders::kot_printed))
        .route("/bills", post(routes::bills::create).get(routes::bills::list))
        .route("/logs/kot", get(routes::kot::logs))
        .route("/logs/kot/stats", get(routes::kot::stats))
        .route("/reports/daily", get(routes::reports::daily))
        .route("/menu", get(routes::menu::enabled).post(routes::menu::create))
        .route("/menu/all", get(routes::menu::all))
        .route("/menu/{id}", put(routes::menu::update))
        .route("/login", post(routes::auth::login));

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/ws", get(routes::ws::upgrade))
        .nest("/api", api)
        .with_state(state)
        .merge(metrics_router)
        .fallback(routes::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
