//! Startup wiring: config check, telemetry, database, storage, router

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use receipt_core::Config;
use receipt_services::StubExtractor;
use std::sync::Arc;

/// Build shared state and the router from a loaded `Config`.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration accepted"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let extractor = Arc::new(StubExtractor);
    tracing::info!(extractor = "stub", "Receipt extractor initialized");

    let state = Arc::new(AppState::new(config.clone(), pool, storage, extractor));
    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
