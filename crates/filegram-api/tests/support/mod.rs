//! Shared test doubles for pipeline and webhook tests.
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use filegram_api::services::telegram::TelegramApi;
use filegram_api::state::{AppState, DocumentPolicy};
use filegram_core::models::telegram::{ResolvedFile, WebhookUpdate};
use filegram_core::AppError;
use filegram_db::FileCatalog;
use filegram_storage::{ObjectStoreClient, ObjectStoreGateway, StorageResult};

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_BUCKET: &str = "filegram-test";

/// Scripted Telegram backend: records every call, responds from fixed data,
/// and can be told to fail the metadata fetch or the binary download.
pub struct ScriptedTelegram {
    pub file_path: String,
    pub payload: Bytes,
    pub content_type: Option<String>,
    pub fail_get_file: bool,
    pub fail_download: bool,
    pub requested_file_ids: Mutex<Vec<String>>,
    pub download_calls: AtomicUsize,
    pub messages: Mutex<Vec<(i64, String)>>,
}

impl Default for ScriptedTelegram {
    fn default() -> Self {
        Self {
            file_path: "documents/file_7.pdf".to_string(),
            payload: Bytes::from_static(b"%PDF-1.7 test payload"),
            content_type: Some("application/pdf".to_string()),
            fail_get_file: false,
            fail_download: false,
            requested_file_ids: Mutex::new(Vec::new()),
            download_calls: AtomicUsize::new(0),
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedTelegram {
    pub fn sent_messages(&self) -> Vec<(i64, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn get_file_calls(&self) -> usize {
        self.requested_file_ids.lock().unwrap().len()
    }
}

#[async_trait]
impl TelegramApi for ScriptedTelegram {
    async fn get_file(&self, file_id: &str) -> Result<ResolvedFile, AppError> {
        self.requested_file_ids
            .lock()
            .unwrap()
            .push(file_id.to_string());
        if self.fail_get_file {
            return Err(AppError::Upstream("Bad Request: file not found".to_string()));
        }
        Ok(ResolvedFile {
            file_id: file_id.to_string(),
            file_unique_id: format!("uniq-{file_id}"),
            file_size: Some(self.payload.len() as i64),
            file_path: self.file_path.clone(),
        })
    }

    async fn download_file(&self, _file_path: &str) -> Result<(Bytes, Option<String>), AppError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_download {
            return Err(AppError::Upstream(
                "file download returned status 404 Not Found".to_string(),
            ));
        }
        Ok((self.payload.clone(), self.content_type.clone()))
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        self.messages
            .lock()
            .unwrap()
            .push((chat_id, text.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PutRecord {
    pub bucket: String,
    pub key: String,
    pub size: usize,
    pub content_type: Option<String>,
}

/// In-memory object store backend that records writes.
#[derive(Default)]
pub struct MemoryStoreClient {
    pub exists_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub puts: Mutex<Vec<PutRecord>>,
}

impl MemoryStoreClient {
    pub fn put_records(&self) -> Vec<PutRecord> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStoreClient for MemoryStoreClient {
    async fn bucket_exists(&self, _bucket: &str) -> StorageResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn create_bucket(&self, _bucket: &str) -> StorageResult<()> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Bytes,
        content_type: Option<&str>,
        _metadata: &HashMap<String, String>,
    ) -> StorageResult<()> {
        self.puts.lock().unwrap().push(PutRecord {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size: payload.len(),
            content_type: content_type.map(str::to_owned),
        });
        Ok(())
    }
}

/// Recording catalog; `fail` makes every insert error.
#[derive(Default)]
pub struct RecordingCatalog {
    pub fail: bool,
    pub rows: Mutex<Vec<(Uuid, Uuid)>>,
}

impl RecordingCatalog {
    pub fn recorded_rows(&self) -> Vec<(Uuid, Uuid)> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileCatalog for RecordingCatalog {
    async fn record_file(
        &self,
        object_file_id: Uuid,
        connection_id: Uuid,
    ) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Internal("catalog insert failed".to_string()));
        }
        self.rows
            .lock()
            .unwrap()
            .push((object_file_id, connection_id));
        Ok(())
    }
}

pub fn test_state(
    telegram: Arc<ScriptedTelegram>,
    store: Arc<MemoryStoreClient>,
    catalog: Arc<RecordingCatalog>,
) -> AppState {
    AppState {
        webhook_secret: TEST_SECRET.to_string(),
        environment: "test".to_string(),
        telegram,
        storage: ObjectStoreGateway::new(store, "http://localhost:9000", TEST_BUCKET),
        catalog,
        document_policy: DocumentPolicy {
            allowed_extensions: vec!["pdf".to_string()],
            allowed_content_types: vec!["application/pdf".to_string()],
        },
    }
}

pub fn update_from_json(value: serde_json::Value) -> WebhookUpdate {
    serde_json::from_value(value).expect("valid webhook update json")
}

pub fn document_update(chat_id: i64, file_name: &str, mime_type: &str) -> WebhookUpdate {
    update_from_json(serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "chat": { "id": chat_id, "type": "private" },
            "date": 1700000000,
            "document": {
                "file_id": "doc-file-id",
                "file_unique_id": "u-doc",
                "file_size": 2048,
                "file_name": file_name,
                "mime_type": mime_type
            }
        }
    }))
}

pub fn photo_update(chat_id: i64) -> WebhookUpdate {
    update_from_json(serde_json::json!({
        "update_id": 2,
        "message": {
            "message_id": 11,
            "chat": { "id": chat_id, "type": "private" },
            "date": 1700000000,
            "photo": [
                { "file_id": "photo-s", "file_unique_id": "u-s", "width": 90, "height": 90, "file_size": 900 },
                { "file_id": "photo-m", "file_unique_id": "u-m", "width": 320, "height": 320, "file_size": 9000 },
                { "file_id": "photo-l", "file_unique_id": "u-l", "width": 1280, "height": 1280, "file_size": 90000 }
            ]
        }
    }))
}

pub fn text_update(chat_id: i64) -> WebhookUpdate {
    update_from_json(serde_json::json!({
        "update_id": 3,
        "message": {
            "message_id": 12,
            "chat": { "id": chat_id, "type": "private" },
            "date": 1700000000,
            "text": "hello"
        }
    }))
}
