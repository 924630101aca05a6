//! Object store client trait
//!
//! The narrow seam between the gateway and a concrete S3-compatible backend.
//! The pipeline only ever writes, so the trait stays write-only.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bucket provisioning failed: {0}")]
    Provisioning(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Write-side object store operations.
///
/// Implemented by the S3 backend and by counting mocks in tests. Bucket
/// provisioning coordination lives in the gateway, not here; implementations
/// perform exactly the call they are asked for.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Check whether the bucket exists.
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool>;

    /// Create the bucket.
    async fn create_bucket(&self, bucket: &str) -> StorageResult<()>;

    /// Durably store a payload under a key. `metadata` entries become
    /// user-defined object headers; `content_type` is stored separately.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Bytes,
        content_type: Option<&str>,
        metadata: &HashMap<String, String>,
    ) -> StorageResult<()>;
}
