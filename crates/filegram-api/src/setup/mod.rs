//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use filegram_core::Config;
use filegram_db::PgFileCatalog;

use crate::services::telegram::BotApiClient;
use crate::state::{AppState, DocumentPolicy};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(AppState, axum::Router)> {
    // Fail fast on misconfiguration before touching any network resource
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_tracing();
    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let telegram = BotApiClient::new(
        &config.telegram_api_base,
        &config.telegram_bot_token,
        Duration::from_secs(config.http_timeout_seconds),
    )?;

    let state = AppState {
        webhook_secret: config.telegram_webhook_secret.clone(),
        environment: config.environment.clone(),
        telegram: Arc::new(telegram),
        storage,
        catalog: Arc::new(PgFileCatalog::new(pool)),
        document_policy: DocumentPolicy::from_config(&config),
    };

    let router = routes::build_router(state.clone());

    Ok((state, router))
}
