//! Filegram API service
//!
//! Receives Telegram webhook updates, relays attached media into an
//! S3-compatible object store and records each stored object in the
//! Postgres catalog. The webhook handler acknowledges immediately; the
//! per-event ingestion pipeline runs as an independent spawned task.

pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
