//! S3 client implementation
//!
//! Backed by aws-sdk-s3 with path-style addressing so S3-compatible
//! providers (MinIO, DigitalOcean Spaces) work with a plain endpoint URL.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::collections::HashMap;

use crate::client::{ObjectStoreClient, StorageError, StorageResult};

/// S3-compatible object store client
#[derive(Clone)]
pub struct S3Client {
    client: Client,
}

impl S3Client {
    /// Build a client from explicit settings, falling back to the ambient
    /// AWS environment (profile, instance role) when no static credentials
    /// are supplied.
    ///
    /// # Arguments
    /// * `endpoint` - Custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO); empty means AWS S3
    /// * `region` - AWS region, or a region identifier for compatible providers
    /// * `access_key_id` / `secret_access_key` - Static credentials (MinIO
    ///   admin user/password); both must be present to take effect
    pub async fn connect(
        endpoint: &str,
        region: &str,
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
    ) -> StorageResult<Self> {
        let base = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&base).force_path_style(true);

        if !endpoint.is_empty() {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(StorageError::Config(format!(
                    "endpoint must be an http(s) URL, got {endpoint}"
                )));
            }
            builder = builder.endpoint_url(endpoint);
        }

        if let (Some(access_key), Some(secret_key)) = (access_key_id, secret_access_key) {
            builder = builder.credentials_provider(Credentials::new(
                access_key, secret_key, None, None, "filegram",
            ));
        }

        Ok(S3Client {
            client: Client::from_conf(builder.build()),
        })
    }
}

#[async_trait]
impl ObjectStoreClient for S3Client {
    async fn bucket_exists(&self, bucket: &str) -> StorageResult<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::Backend(format!(
                        "head_bucket failed: {service_err}"
                    )))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str) -> StorageResult<()> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                StorageError::Backend(format!(
                    "create_bucket failed: {}",
                    e.into_service_error()
                ))
            })?;
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: Bytes,
        content_type: Option<&str>,
        metadata: &HashMap<String, String>,
    ) -> StorageResult<()> {
        let size = payload.len() as u64;
        let start = std::time::Instant::now();

        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(payload));

        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }
        for (name, value) in metadata {
            request = request.metadata(name, value);
        }

        request.send().await.map_err(|e| {
            tracing::error!(
                error = %e.into_service_error(),
                bucket = %bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::Upload(format!("put_object failed for key {key}"))
        })?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put_object successful"
        );

        Ok(())
    }
}
