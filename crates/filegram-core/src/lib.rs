//! Filegram core library
//!
//! Shared configuration, error types and domain models for the filegram
//! service. This crate is dependency-light so that the storage, db and api
//! crates can all build on it.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, AppResult};
