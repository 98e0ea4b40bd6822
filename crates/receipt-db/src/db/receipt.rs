use chrono::Utc;
use receipt_core::models::{ExtractedReceipt, ReceiptRecord};
use receipt_core::AppError;
use sqlx::{Sqlite, SqlitePool};

use super::transaction::TransactionGuard;

const RECEIPT_COLUMNS: &str =
    "id, purchased_at, merchant_name, total_amount, file_path, created_at, updated_at";

/// Result of trying to record the receipt for a file.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// The file was claimed by this call and its receipt inserted.
    Created(ReceiptRecord),
    /// The file was already marked processed; nothing was written.
    AlreadyClaimed,
}

/// Repository for extracted receipts.
#[derive(Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "receipt", db.operation = "select"))]
    pub async fn list_all(&self) -> Result<Vec<ReceiptRecord>, AppError> {
        let receipts = sqlx::query_as::<Sqlite, ReceiptRecord>(&format!(
            "SELECT {} FROM receipt ORDER BY id",
            RECEIPT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(receipts)
    }

    #[tracing::instrument(skip(self), fields(db.table = "receipt", db.operation = "select"))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<ReceiptRecord>, AppError> {
        let receipt = sqlx::query_as::<Sqlite, ReceiptRecord>(&format!(
            "SELECT {} FROM receipt WHERE id = ?",
            RECEIPT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    #[tracing::instrument(skip(self), fields(db.table = "receipt", db.operation = "select"))]
    pub async fn find_by_file_path(
        &self,
        file_path: &str,
    ) -> Result<Option<ReceiptRecord>, AppError> {
        let receipt = sqlx::query_as::<Sqlite, ReceiptRecord>(&format!(
            "SELECT {} FROM receipt WHERE file_path = ? ORDER BY id LIMIT 1",
            RECEIPT_COLUMNS
        ))
        .bind(file_path)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receipt)
    }

    /// Mark the file processed and insert its receipt in one transaction.
    ///
    /// The `is_processed = FALSE` guard on the update is the claim: of several
    /// concurrent callers for the same file exactly one sees a changed row and
    /// inserts a receipt; the others get [`ClaimOutcome::AlreadyClaimed`].
    #[tracing::instrument(
        skip(self, extracted),
        fields(db.table = "receipt", db.operation = "insert")
    )]
    pub async fn create_for_file(
        &self,
        file_id: i64,
        file_path: &str,
        extracted: &ExtractedReceipt,
    ) -> Result<ClaimOutcome, AppError> {
        let now = Utc::now();
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let claimed = sqlx::query(
            r#"
            UPDATE receipt_file
            SET is_processed = TRUE, updated_at = ?
            WHERE id = ? AND is_processed = FALSE
            "#,
        )
        .bind(now)
        .bind(file_id)
        .execute(&mut **tx)
        .await?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await?;
            tracing::debug!(file_id, "File already claimed for processing");
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        let receipt = sqlx::query_as::<Sqlite, ReceiptRecord>(&format!(
            r#"
            INSERT INTO receipt (purchased_at, merchant_name, total_amount, file_path, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            RECEIPT_COLUMNS
        ))
        .bind(&extracted.purchased_at)
        .bind(&extracted.merchant_name)
        .bind(extracted.total_amount)
        .bind(file_path)
        .bind(now)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;

        tx.commit().await?;

        Ok(ClaimOutcome::Created(receipt))
    }
}
