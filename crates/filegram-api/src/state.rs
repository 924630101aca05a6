//! Application state

use std::sync::Arc;

use filegram_core::Config;
use filegram_db::FileCatalog;
use filegram_storage::ObjectStoreGateway;

use crate::services::telegram::TelegramApi;

/// Content policy gate for document attachments. A document passes if its
/// declared media type or its file name suffix matches the allow lists.
#[derive(Debug, Clone)]
pub struct DocumentPolicy {
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

impl DocumentPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            allowed_extensions: config.document_allowed_extensions.clone(),
            allowed_content_types: config.document_allowed_content_types.clone(),
        }
    }

    pub fn allows(&self, file_name: Option<&str>, mime_type: Option<&str>) -> bool {
        if let Some(mime_type) = mime_type {
            if self
                .allowed_content_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
            {
                return true;
            }
        }

        if let Some(name) = file_name {
            if let Some((_, extension)) = name.rsplit_once('.') {
                if self
                    .allowed_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(extension))
                {
                    return true;
                }
            }
        }

        false
    }

    /// User-facing explanation for a rejected document.
    pub fn rejection_text(&self) -> String {
        format!(
            "Sorry, I only accept {} documents.",
            self.allowed_extensions.join("/")
        )
    }
}

/// Shared application state handed to every request handler and cloned into
/// each spawned pipeline task.
#[derive(Clone)]
pub struct AppState {
    pub webhook_secret: String,
    pub environment: String,
    pub telegram: Arc<dyn TelegramApi>,
    pub storage: ObjectStoreGateway,
    pub catalog: Arc<dyn FileCatalog>,
    pub document_policy: DocumentPolicy,
}
