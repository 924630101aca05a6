//! File catalog repository
//!
//! Records which stored objects exist and which connection owns them.
//! Insert-only from the pipeline's point of view: duplicate calls create
//! duplicate rows by contract, and a failed insert never unwinds the
//! already-completed upload.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use filegram_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

/// A `files` row binding a stored object to its owning connection.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecord {
    pub id: Uuid,
    pub object_file_id: Uuid,
    pub connection_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Write seam for the catalog, mockable in pipeline tests.
#[async_trait]
pub trait FileCatalog: Send + Sync {
    /// Insert one row linking a stored object to its owning connection.
    async fn record_file(
        &self,
        object_file_id: Uuid,
        connection_id: Uuid,
    ) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgFileCatalog {
    pool: PgPool,
}

impl PgFileCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileCatalog for PgFileCatalog {
    async fn record_file(
        &self,
        object_file_id: Uuid,
        connection_id: Uuid,
    ) -> Result<(), AppError> {
        let record: FileRecord = sqlx::query_as(
            r#"
            INSERT INTO files (id, object_file_id, connection_id, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(object_file_id)
        .bind(connection_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            record_id = %record.id,
            object_file_id = %object_file_id,
            connection_id = %connection_id,
            "Recorded file in catalog"
        );

        Ok(())
    }
}
