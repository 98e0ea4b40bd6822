use chrono::Utc;
use receipt_core::models::FileRecord;
use receipt_core::AppError;
use sqlx::{Sqlite, SqlitePool};

/// Repository for `receipt_file` rows (one per upload attempt).
#[derive(Clone)]
pub struct ReceiptFileRepository {
    pool: SqlitePool,
}

impl ReceiptFileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a freshly uploaded file: validity unknown, not processed.
    #[tracing::instrument(skip(self), fields(db.table = "receipt_file", db.operation = "insert"))]
    pub async fn create(&self, file_name: &str, file_path: &str) -> Result<FileRecord, AppError> {
        let now = Utc::now();

        let record = sqlx::query_as::<Sqlite, FileRecord>(
            r#"
            INSERT INTO receipt_file (file_name, file_path, is_valid, invalid_reason, is_processed, created_at, updated_at)
            VALUES (?, ?, NULL, NULL, FALSE, ?, ?)
            RETURNING id, file_name, file_path, is_valid, invalid_reason, is_processed, created_at, updated_at
            "#,
        )
        .bind(file_name)
        .bind(file_path)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "receipt_file", db.operation = "select"))]
    pub async fn find_by_id_and_name(
        &self,
        id: i64,
        file_name: &str,
    ) -> Result<Option<FileRecord>, AppError> {
        let record = sqlx::query_as::<Sqlite, FileRecord>(
            r#"
            SELECT id, file_name, file_path, is_valid, invalid_reason, is_processed, created_at, updated_at
            FROM receipt_file
            WHERE id = ? AND file_name = ?
            "#,
        )
        .bind(id)
        .bind(file_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Highest id among uploads sharing `file_name`, i.e. the latest upload.
    #[tracing::instrument(skip(self), fields(db.table = "receipt_file", db.operation = "select"))]
    pub async fn latest_id_for_name(&self, file_name: &str) -> Result<Option<i64>, AppError> {
        let max_id: Option<i64> =
            sqlx::query_scalar("SELECT MAX(id) FROM receipt_file WHERE file_name = ?")
                .bind(file_name)
                .fetch_one(&self.pool)
                .await?;

        Ok(max_id)
    }

    /// Record the outcome of validation. Never touches `is_processed`.
    #[tracing::instrument(skip(self), fields(db.table = "receipt_file", db.operation = "update"))]
    pub async fn update_validation(
        &self,
        id: i64,
        is_valid: bool,
        invalid_reason: Option<&str>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE receipt_file
            SET is_valid = ?, invalid_reason = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(is_valid)
        .bind(invalid_reason)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("File {} not found", id)));
        }

        Ok(())
    }
}
