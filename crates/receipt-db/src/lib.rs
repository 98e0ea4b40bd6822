//! Receipt Database Library
//!
//! Repositories over the `receipt_file` and `receipt` tables, plus the embedded
//! schema migrations.

pub mod db;

pub use db::{ClaimOutcome, ReceiptFileRepository, ReceiptRepository};

use receipt_core::AppError;
use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply pending migrations. Every statement is create-if-absent, so this is safe on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    /// Fresh migrated database in a temporary directory.
    pub async fn test_pool() -> (TempDir, SqlitePool) {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("receipts.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .expect("connect test database");
        super::run_migrations(&pool).await.expect("migrations");
        (dir, pool)
    }
}
