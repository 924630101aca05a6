//! Route wiring

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::webhook;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(webhook::health))
        .route("/webhook", post(webhook::receive_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
