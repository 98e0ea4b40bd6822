//! Database setup and initialization

use anyhow::{Context, Result};
use receipt_core::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Open the SQLite pool (creating the database file and its directory) and run migrations.
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!(url = %config.database_url(), "Connecting to database...");

    let timeout = Duration::from_secs(config.db_timeout_seconds());
    let options = SqliteConnectOptions::from_str(config.database_url())
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .busy_timeout(timeout);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(timeout)
        .idle_timeout(Duration::from_secs(600))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    receipt_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}
