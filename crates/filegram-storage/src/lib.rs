//! Filegram storage library
//!
//! Object store abstraction and the ingestion-facing gateway. The
//! `ObjectStoreClient` trait covers the three operations the pipeline needs
//! (head-bucket, create-bucket, put-object); `ObjectStoreGateway` layers
//! lazy single-flight bucket provisioning and URL construction on top.
//!
//! # Object key format
//!
//! Keys are flat paths: `{sub_dir}/{uuid}_{display_name}`. The uuid prefix
//! is the object's storage identity and doubles as the catalog's
//! `object_file_id`. Keys never contain `..` segments or leading slashes;
//! key generation is centralized in the `keys` module.

pub mod client;
pub mod gateway;
pub mod keys;
pub mod s3;

pub use client::{ObjectStoreClient, StorageError, StorageResult};
pub use gateway::{ObjectStoreGateway, StoredObject};
pub use s3::S3Client;
