//! Object store gateway
//!
//! Sits between the ingestion pipeline and the raw `ObjectStoreClient`.
//! Adds lazy bucket provisioning (at most one in-flight attempt process-wide,
//! reset on failure so a later event can retry), header merging on upload,
//! and pure retrieval-URL construction.

use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::client::{ObjectStoreClient, StorageError, StorageResult};

/// Reserved header key; a content-type passed explicitly wins over one
/// smuggled in through the metadata map.
const CONTENT_TYPE_KEY: &str = "Content-Type";

/// A completed durable write: `(bucket, key)`. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
}

type ProvisionOutcome = Result<(), Arc<StorageError>>;
type ProvisionFuture = Shared<BoxFuture<'static, ProvisionOutcome>>;

#[derive(Clone)]
pub struct ObjectStoreGateway {
    client: Arc<dyn ObjectStoreClient>,
    endpoint: String,
    bucket: String,
    /// Single-flight cell for bucket provisioning: `None` = uninitialized,
    /// `Some(fut)` = in progress or ready. Cleared on failure.
    provisioned: Arc<Mutex<Option<ProvisionFuture>>>,
}

impl ObjectStoreGateway {
    pub fn new(
        client: Arc<dyn ObjectStoreClient>,
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            provisioned: Arc::new(Mutex::new(None)),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Ensure the bucket exists, creating it on first use.
    ///
    /// Concurrent callers on a cold cell all await the same in-flight
    /// attempt, so the backend sees at most one existence check and at most
    /// one create. A failed attempt resets the cell; the next caller starts
    /// a fresh one.
    pub async fn ensure_bucket(&self) -> StorageResult<()> {
        let attempt = {
            let mut slot = self
                .provisioned
                .lock()
                .expect("bucket provisioning lock poisoned");
            match slot.as_ref() {
                Some(inflight) => inflight.clone(),
                None => {
                    let client = self.client.clone();
                    let bucket = self.bucket.clone();
                    let fresh: ProvisionFuture = async move {
                        let exists = client.bucket_exists(&bucket).await.map_err(Arc::new)?;
                        if !exists {
                            client.create_bucket(&bucket).await.map_err(Arc::new)?;
                            tracing::info!(bucket = %bucket, "Created bucket");
                        }
                        Ok(())
                    }
                    .boxed()
                    .shared();
                    *slot = Some(fresh.clone());
                    fresh
                }
            }
        };

        match attempt.clone().await {
            Ok(()) => Ok(()),
            Err(err) => {
                // Reset only if the cell still holds this failed attempt;
                // another task may already have started a fresh one.
                let mut slot = self
                    .provisioned
                    .lock()
                    .expect("bucket provisioning lock poisoned");
                if slot.as_ref().is_some_and(|f| f.ptr_eq(&attempt)) {
                    *slot = None;
                }
                Err(StorageError::Provisioning(err.to_string()))
            }
        }
    }

    /// Durably store a payload under `key`, provisioning the bucket first.
    ///
    /// The stored size is the payload's exact byte length. Metadata entries
    /// are merged into the object headers, with an explicit `content_type`
    /// taking precedence under the reserved `Content-Type` key. No retries;
    /// the caller decides what a failure means.
    pub async fn upload(
        &self,
        payload: Bytes,
        key: &str,
        content_type: Option<&str>,
        metadata: Option<HashMap<String, String>>,
    ) -> StorageResult<StoredObject> {
        self.ensure_bucket().await?;

        let size = payload.len() as u64;
        let mut metadata = metadata.unwrap_or_default();
        let content_type = content_type
            .map(str::to_owned)
            .or_else(|| metadata.remove(CONTENT_TYPE_KEY));

        let start = Instant::now();
        self.client
            .put_object(
                &self.bucket,
                key,
                payload,
                content_type.as_deref(),
                &metadata,
            )
            .await?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Uploaded object"
        );

        Ok(StoredObject {
            bucket: self.bucket.clone(),
            key: key.to_string(),
        })
    }

    /// Retrieval URL for a key: `{endpoint}/{bucket}/{key}` (path style).
    /// Pure string construction; never touches the network.
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Counting fake backend. `fail_next_exists` makes the next existence
    /// check fail, then clears itself.
    struct CountingClient {
        exists_calls: AtomicUsize,
        create_calls: AtomicUsize,
        bucket_present: bool,
        fail_next_exists: AtomicBool,
        puts: Mutex<Vec<(String, String, usize, Option<String>)>>,
    }

    impl CountingClient {
        fn new(bucket_present: bool) -> Self {
            Self {
                exists_calls: AtomicUsize::new(0),
                create_calls: AtomicUsize::new(0),
                bucket_present,
                fail_next_exists: AtomicBool::new(false),
                puts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStoreClient for CountingClient {
        async fn bucket_exists(&self, _bucket: &str) -> StorageResult<bool> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            // Keep the attempt in flight long enough for callers to pile up
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_next_exists.swap(false, Ordering::SeqCst) {
                return Err(StorageError::Backend("connection refused".to_string()));
            }
            Ok(self.bucket_present)
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
            // The bucket must be provisioned before any write reaches us
            assert!(
                self.exists_calls.load(Ordering::SeqCst) > 0,
                "put_object called before bucket provisioning"
            );
            self.puts.lock().unwrap().push((
                bucket.to_string(),
                key.to_string(),
                payload.len(),
                content_type.map(str::to_owned),
            ));
            Ok(())
        }
    }

    fn gateway(client: Arc<CountingClient>) -> ObjectStoreGateway {
        ObjectStoreGateway::new(client, "http://localhost:9000", "filegram")
    }

    #[tokio::test]
    async fn concurrent_cold_callers_share_one_provisioning_attempt() {
        let client = Arc::new(CountingClient::new(false));
        let gw = gateway(client.clone());

        let results = futures::future::join_all((0..8).map(|_| {
            let gw = gw.clone();
            async move { gw.ensure_bucket().await }
        }))
        .await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(client.exists_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn existing_bucket_is_never_created() {
        let client = Arc::new(CountingClient::new(true));
        let gw = gateway(client.clone());

        gw.ensure_bucket().await.unwrap();
        gw.ensure_bucket().await.unwrap();

        assert_eq!(client.exists_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provisioning_failure_does_not_poison_the_cell() {
        let client = Arc::new(CountingClient::new(true));
        client.fail_next_exists.store(true, Ordering::SeqCst);
        let gw = gateway(client.clone());

        let err = gw.ensure_bucket().await.unwrap_err();
        assert!(matches!(err, StorageError::Provisioning(_)));

        // The cell was reset; a later call retries from scratch and succeeds
        gw.ensure_bucket().await.unwrap();
        assert_eq!(client.exists_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn upload_provisions_first_and_passes_exact_byte_length() {
        let client = Arc::new(CountingClient::new(true));
        let gw = gateway(client.clone());

        let payload = Bytes::from_static(b"hello object store");
        let stored = gw
            .upload(payload.clone(), "documents/a.pdf", Some("application/pdf"), None)
            .await
            .unwrap();

        assert_eq!(stored.bucket, "filegram");
        assert_eq!(stored.key, "documents/a.pdf");

        let puts = client.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        let (bucket, key, size, content_type) = &puts[0];
        assert_eq!(bucket, "filegram");
        assert_eq!(key, "documents/a.pdf");
        assert_eq!(*size, payload.len());
        assert_eq!(content_type.as_deref(), Some("application/pdf"));
    }

    #[tokio::test]
    async fn metadata_content_type_is_used_when_no_explicit_one_is_given() {
        let client = Arc::new(CountingClient::new(true));
        let gw = gateway(client.clone());

        let mut metadata = HashMap::new();
        metadata.insert("Content-Type".to_string(), "audio/ogg".to_string());
        metadata.insert("origin".to_string(), "telegram".to_string());

        gw.upload(Bytes::from_static(b"x"), "voice/v.oga", None, Some(metadata))
            .await
            .unwrap();

        let puts = client.puts.lock().unwrap();
        assert_eq!(puts[0].3.as_deref(), Some("audio/ogg"));
    }

    #[test]
    fn object_url_is_pure_and_only_the_scheme_tracks_tls() {
        let client = Arc::new(CountingClient::new(true));
        let plain = ObjectStoreGateway::new(client.clone(), "http://minio:9000", "media");
        let secure = ObjectStoreGateway::new(client, "https://minio:9000", "media");

        let url = plain.object_url("photos/p.jpg");
        assert_eq!(url, "http://minio:9000/media/photos/p.jpg");
        assert_eq!(url, plain.object_url("photos/p.jpg"));

        assert_eq!(
            secure.object_url("photos/p.jpg"),
            "https://minio:9000/media/photos/p.jpg"
        );
    }
}
