//! Ingestion pipeline orchestrator
//!
//! One invocation per inbound update, spawned from the webhook handler and
//! isolated from it. The contract per event: either a single "unsupported"
//! or rejection message, or exactly one start message followed by exactly
//! one terminal (success or failure) message. Errors terminate here, at a
//! logging sink.

use filegram_core::models::event::{AttachmentKind, IngestionEvent};
use filegram_core::models::telegram::WebhookUpdate;
use filegram_core::AppError;
use filegram_storage::keys::{self, NameCandidates, ObjectIdentity};

use crate::state::AppState;

const FAILURE_TEXT: &str = "Failed to save file ❌";
const UNSUPPORTED_TEXT: &str =
    "Sorry, I can only save documents, photos, voice notes, audio and video.";

/// Entry point for one webhook update.
pub async fn handle_update(state: AppState, update: WebhookUpdate) {
    let Some(message) = update.message else {
        tracing::warn!(
            update_id = update.update_id,
            "Webhook update received without message payload"
        );
        return;
    };

    let chat_id = message.chat.id;
    tracing::info!(chat_id, message_id = message.message_id, "Telegram message received");

    let Some(event) = IngestionEvent::classify(&message) else {
        tracing::warn!(
            chat_id,
            message_id = message.message_id,
            "Unsupported Telegram message type received"
        );
        notify(&state, chat_id, UNSUPPORTED_TEXT).await;
        return;
    };

    // Policy gate: rejected documents never reach the resolver
    if event.kind == AttachmentKind::Document
        && !state
            .document_policy
            .allows(event.file_name.as_deref(), event.mime_type.as_deref())
    {
        tracing::warn!(
            chat_id,
            file_id = %event.file_id,
            file_name = ?event.file_name,
            mime_type = ?event.mime_type,
            "Document rejected by content policy"
        );
        notify(&state, chat_id, &state.document_policy.rejection_text()).await;
        return;
    }

    notify(&state, chat_id, event.kind.start_text()).await;

    match ingest(&state, &event).await {
        Ok(object_key) => {
            let text = format!("{}\nObject path: {}", event.kind.success_text(), object_key);
            notify(&state, chat_id, &text).await;
        }
        Err(err) => {
            tracing::error!(
                chat_id,
                file_id = %event.file_id,
                kind = event.kind.label(),
                error = %err,
                "Ingestion failed"
            );
            notify(&state, chat_id, FAILURE_TEXT).await;
        }
    }
}

/// Resolve, download, upload and catalog one attachment. Returns the final
/// object key for the success message.
async fn ingest(state: &AppState, event: &IngestionEvent) -> Result<String, AppError> {
    let resolved = state.telegram.get_file(&event.file_id).await?;

    let display_name = keys::resolve_base_name(&NameCandidates {
        override_name: event.file_name.as_deref(),
        preferred_name: event.file_name.as_deref(),
        remote_path: Some(&resolved.file_path),
        file_id: &event.file_id,
    });
    let identity = ObjectIdentity::new(&display_name);
    let object_key = keys::build_object_key(event.kind.sub_dir(), &identity.stored_name);
    tracing::debug!(file_id = %event.file_id, object_key = %object_key, "Resolved object key");

    let (payload, content_type) = state.telegram.download_file(&resolved.file_path).await?;

    let stored = state
        .storage
        .upload(payload, &object_key, content_type.as_deref(), None)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    // The object stays stored even if this insert fails; that window is an
    // accepted trade-off rather than a distributed transaction.
    state
        .catalog
        .record_file(identity.object_id, event.connection_id())
        .await?;

    tracing::info!(
        chat_id = event.chat_id,
        file_id = %event.file_id,
        bucket = %stored.bucket,
        object_key = %stored.key,
        url = %state.storage.object_url(&stored.key),
        "File stored and cataloged"
    );

    Ok(stored.key)
}

/// Fire-and-forget outbound message; delivery failures are logged, never
/// escalated.
async fn notify(state: &AppState, chat_id: i64, text: &str) {
    if let Err(err) = state.telegram.send_message(chat_id, text).await {
        tracing::warn!(chat_id, error = %err, "Failed to send Telegram message");
    }
}
