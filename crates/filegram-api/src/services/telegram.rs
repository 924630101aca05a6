//! Telegram Bot API client
//!
//! Metadata lookup, file download and outbound messages, behind a trait so
//! the pipeline can be exercised without the network.

use async_trait::async_trait;
use bytes::Bytes;
use filegram_core::models::telegram::{ApiEnvelope, ResolvedFile};
use filegram_core::AppError;
use std::time::Duration;

/// Upstream platform operations used by the ingestion pipeline.
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Resolve transfer metadata for an opaque file reference. Single round
    /// trip; a failure here aborts the ingestion for that event.
    async fn get_file(&self, file_id: &str) -> Result<ResolvedFile, AppError>;

    /// Fetch the raw bytes behind a transfer path, along with the response
    /// content type when the platform declares one.
    async fn download_file(&self, file_path: &str) -> Result<(Bytes, Option<String>), AppError>;

    /// Plain-text message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AppError>;
}

pub struct BotApiClient {
    http: reqwest::Client,
    /// `{base}/bot{token}` — Bot API methods
    api_base: String,
    /// `{base}/file/bot{token}` — file downloads
    file_base: String,
}

impl BotApiClient {
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build Telegram HTTP client: {e}")))?;

        let base = api_base.trim_end_matches('/');
        Ok(Self {
            http,
            api_base: format!("{base}/bot{token}"),
            file_base: format!("{base}/file/bot{token}"),
        })
    }
}

#[async_trait]
impl TelegramApi for BotApiClient {
    async fn get_file(&self, file_id: &str) -> Result<ResolvedFile, AppError> {
        let url = format!("{}/getFile", self.api_base);
        let response = self
            .http
            .get(&url)
            .query(&[("file_id", file_id)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("getFile request failed: {e}")))?;

        let envelope: ApiEnvelope<ResolvedFile> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("getFile returned a malformed body: {e}")))?;

        if !envelope.ok {
            return Err(AppError::Upstream(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        envelope
            .result
            .ok_or_else(|| AppError::Upstream("getFile response missing result".to_string()))
    }

    async fn download_file(&self, file_path: &str) -> Result<(Bytes, Option<String>), AppError> {
        let url = format!("{}/{}", self.file_base, file_path.trim_start_matches('/'));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("file download failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "file download returned status {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("file download body read failed: {e}")))?;

        if bytes.is_empty() {
            return Err(AppError::Upstream(
                "file download returned an empty body".to_string(),
            ));
        }

        Ok((bytes, content_type))
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        let url = format!("{}/sendMessage", self.api_base);
        let payload = serde_json::json!({ "chat_id": chat_id, "text": text });

        tracing::debug!(chat_id, "Sending Telegram message");
        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("sendMessage request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "sendMessage returned status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
