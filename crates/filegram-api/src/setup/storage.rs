//! Object storage setup

use anyhow::Result;
use filegram_core::Config;
use filegram_storage::{ObjectStoreGateway, S3Client};
use std::sync::Arc;

/// Build the object store gateway. Bucket provisioning itself stays lazy;
/// the first upload triggers it.
pub async fn setup_storage(config: &Config) -> Result<ObjectStoreGateway> {
    tracing::info!(
        endpoint = %config.s3_endpoint,
        bucket = %config.s3_bucket,
        region = %config.s3_region,
        "Initializing object storage"
    );

    let client = S3Client::connect(
        &config.s3_endpoint,
        &config.s3_region,
        config.s3_access_key_id.as_deref(),
        config.s3_secret_access_key.as_deref(),
    )
    .await?;

    Ok(ObjectStoreGateway::new(
        Arc::new(client),
        &config.s3_endpoint,
        &config.s3_bucket,
    ))
}
