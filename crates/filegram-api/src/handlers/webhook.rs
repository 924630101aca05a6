//! Webhook boundary
//!
//! Authenticates the shared-secret header, validates the payload shape and
//! acknowledges to Telegram before the pipeline runs. Telegram retries
//! un-acked updates, so permanently invalid payloads are also answered with
//! 200 — just with a different body.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use filegram_core::models::telegram::WebhookUpdate;
use subtle::ConstantTimeEq;

use crate::services::pipeline;
use crate::state::AppState;

pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

pub async fn health() -> &'static str {
    "OK"
}

pub async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let presented = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !bool::from(
        presented
            .as_bytes()
            .ct_eq(state.webhook_secret.as_bytes()),
    ) {
        tracing::warn!("Rejected webhook: invalid secret token");
        return (StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let update: WebhookUpdate = match serde_json::from_str(&body) {
        Ok(update) => update,
        Err(err) => {
            // 200 so Telegram stops retrying an update that can never validate
            tracing::warn!(error = %err, "Webhook validation failed");
            return (StatusCode::OK, "Invalid Schema");
        }
    };

    tracing::info!(update_id = update.update_id, "Incoming Telegram webhook");

    // Ack immediately; pipeline errors terminate at the logging sink inside
    // the task, never at this response
    tokio::spawn(pipeline::handle_update(state, update));

    (StatusCode::OK, "OK")
}
