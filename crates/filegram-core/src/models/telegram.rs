//! Telegram Bot API wire types
//!
//! Typed representations of the webhook payload and the Bot API response
//! envelope. Deserialization at the webhook boundary is the single schema
//! check; the pipeline never re-validates these shapes.

use serde::Deserialize;

/// One inbound webhook update.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub chat: TelegramChat,
    pub date: i64,
    pub text: Option<String>,
    pub document: Option<TelegramDocument>,
    /// Telegram sends photo variants ordered by ascending size.
    pub photo: Option<Vec<TelegramPhotoSize>>,
    pub voice: Option<TelegramFile>,
    pub audio: Option<TelegramAudio>,
    pub video: Option<TelegramFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramFile {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramDocument {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_size: Option<i64>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramPhotoSize {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_size: Option<i64>,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAudio {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_size: Option<i64>,
    pub duration: i64,
    pub mime_type: Option<String>,
}

/// Bot API response envelope: `{ok, result}` on success, `{ok:false,
/// description}` on failure.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// Transfer metadata returned by `getFile`. Consumed once, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedFile {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_size: Option<i64>,
    pub file_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_update_deserializes_document_message() {
        let payload = serde_json::json!({
            "update_id": 42,
            "message": {
                "message_id": 7,
                "chat": { "id": 1001, "type": "private", "username": "alice" },
                "date": 1700000000,
                "document": {
                    "file_id": "doc-1",
                    "file_unique_id": "u-doc-1",
                    "file_size": 2048,
                    "file_name": "report.pdf",
                    "mime_type": "application/pdf"
                }
            }
        });

        let update: WebhookUpdate = serde_json::from_value(payload).unwrap();
        let message = update.message.unwrap();
        let document = message.document.unwrap();
        assert_eq!(message.chat.id, 1001);
        assert_eq!(document.file_name.as_deref(), Some("report.pdf"));
        assert_eq!(document.mime_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn api_envelope_carries_description_on_failure() {
        let body = r#"{"ok":false,"description":"Bad Request: file is too big"}"#;
        let envelope: ApiEnvelope<ResolvedFile> = serde_json::from_str(body).unwrap();
        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(
            envelope.description.as_deref(),
            Some("Bad Request: file is too big")
        );
    }
}
