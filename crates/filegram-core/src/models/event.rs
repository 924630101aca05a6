//! Ingestion event model
//!
//! Classification of an inbound Telegram message into a typed event the
//! pipeline can act on. An event carries everything the orchestrator needs;
//! the raw message is not consulted again after classification.

use uuid::Uuid;

use super::telegram::TelegramMessage;

/// Supported attachment kinds, with the per-kind display strings and the
/// storage subdirectory each kind lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Document,
    Photo,
    Voice,
    Audio,
    Video,
}

impl AttachmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            AttachmentKind::Document => "document",
            AttachmentKind::Photo => "photo",
            AttachmentKind::Voice => "voice",
            AttachmentKind::Audio => "audio",
            AttachmentKind::Video => "video",
        }
    }

    pub fn sub_dir(&self) -> &'static str {
        match self {
            AttachmentKind::Document => "documents",
            AttachmentKind::Photo => "photos",
            AttachmentKind::Voice => "voice",
            AttachmentKind::Audio => "audio",
            AttachmentKind::Video => "videos",
        }
    }

    pub fn start_text(&self) -> &'static str {
        match self {
            AttachmentKind::Document => "Processing document...",
            AttachmentKind::Photo => "Processing photo...",
            AttachmentKind::Voice => "Processing voice note...",
            AttachmentKind::Audio => "Processing audio...",
            AttachmentKind::Video => "Processing video...",
        }
    }

    pub fn success_text(&self) -> &'static str {
        match self {
            AttachmentKind::Document => "Document saved! ✅",
            AttachmentKind::Photo => "Photo saved! 📸",
            AttachmentKind::Voice => "Voice note saved! 🎤",
            AttachmentKind::Audio => "Audio saved! 🎧",
            AttachmentKind::Video => "Video saved! 🎬",
        }
    }
}

/// A classified inbound event. Immutable; built once per webhook message.
#[derive(Debug, Clone)]
pub struct IngestionEvent {
    pub chat_id: i64,
    pub message_id: i64,
    pub kind: AttachmentKind,
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

impl IngestionEvent {
    /// Classify a message by its attachment. Returns `None` for messages
    /// with no attachment or an unsupported kind.
    ///
    /// For photos Telegram provides variants in ascending size; the last
    /// element is the highest resolution and the only one ingested.
    pub fn classify(message: &TelegramMessage) -> Option<Self> {
        let chat_id = message.chat.id;
        let message_id = message.message_id;

        if let Some(document) = &message.document {
            return Some(Self {
                chat_id,
                message_id,
                kind: AttachmentKind::Document,
                file_id: document.file_id.clone(),
                file_name: document.file_name.clone(),
                mime_type: document.mime_type.clone(),
            });
        }

        if let Some(sizes) = &message.photo {
            if let Some(largest) = sizes.last() {
                return Some(Self {
                    chat_id,
                    message_id,
                    kind: AttachmentKind::Photo,
                    file_id: largest.file_id.clone(),
                    file_name: None,
                    mime_type: None,
                });
            }
        }

        if let Some(voice) = &message.voice {
            return Some(Self {
                chat_id,
                message_id,
                kind: AttachmentKind::Voice,
                file_id: voice.file_id.clone(),
                file_name: None,
                mime_type: None,
            });
        }

        if let Some(audio) = &message.audio {
            return Some(Self {
                chat_id,
                message_id,
                kind: AttachmentKind::Audio,
                file_id: audio.file_id.clone(),
                file_name: None,
                mime_type: audio.mime_type.clone(),
            });
        }

        if let Some(video) = &message.video {
            return Some(Self {
                chat_id,
                message_id,
                kind: AttachmentKind::Video,
                file_id: video.file_id.clone(),
                file_name: None,
                mime_type: None,
            });
        }

        None
    }

    /// Deterministic owning-connection id for the originating chat. Repeated
    /// uploads from the same chat are attributed to the same connection
    /// without a lookup table.
    pub fn connection_id(&self) -> Uuid {
        Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            format!("telegram:{}", self.chat_id).as_bytes(),
        )
    }
}
