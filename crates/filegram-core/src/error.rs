//! Error types module
//!
//! All errors raised inside the ingestion pipeline are unified under the
//! `AppError` enum. The webhook boundary rejects invalid payloads before the
//! pipeline runs, so `InvalidInput` never travels further than the handler;
//! everything else is caught at the top of the spawned pipeline task, logged,
//! and turned into a single user-facing failure message.

use sqlx::Error as SqlxError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Catalog insert or connection failure.
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    /// Telegram metadata fetch or binary download failure. Carries the
    /// platform's description string for logging.
    #[error("Telegram error: {0}")]
    Upstream(String),

    /// Bucket provisioning or object upload failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Attachment kind or document type rejected by the content policy.
    #[error("Unsupported content: {0}")]
    UnsupportedContent(String),

    /// Bad inbound payload; rejected at the boundary, never enters the core.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
