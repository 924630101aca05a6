//! Filegram database library
//!
//! The catalog: the relational audit trail of stored objects. One table,
//! one write path.

pub mod catalog;

pub use catalog::{FileCatalog, FileRecord, PgFileCatalog};
