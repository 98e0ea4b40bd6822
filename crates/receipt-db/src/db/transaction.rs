//! Scoped SQLite transactions
//!
//! Claiming a file and inserting its receipt must land together; both
//! statements run on a [`TransactionGuard`] and are finished explicitly.

use receipt_core::AppError;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::ops::{Deref, DerefMut};

const FINISHED: &str = "transaction used after commit or rollback";

/// Owns an open transaction until [`commit`](Self::commit) or
/// [`rollback`](Self::rollback) consumes it.
///
/// Statements run against `&mut **guard`. A guard that goes out of scope
/// unfinished is rolled back by sqlx and logged here.
pub struct TransactionGuard<'a> {
    inner: Option<Transaction<'a, Sqlite>>,
}

impl<'a> TransactionGuard<'a> {
    pub async fn begin(pool: &'a SqlitePool) -> Result<Self, AppError> {
        let tx = pool.begin().await?;
        Ok(Self { inner: Some(tx) })
    }

    pub async fn commit(mut self) -> Result<(), AppError> {
        match self.inner.take() {
            Some(tx) => tx.commit().await.map_err(AppError::from),
            None => Ok(()),
        }
    }

    pub async fn rollback(mut self) -> Result<(), AppError> {
        match self.inner.take() {
            Some(tx) => tx.rollback().await.map_err(AppError::from),
            None => Ok(()),
        }
    }
}

impl<'a> Deref for TransactionGuard<'a> {
    type Target = Transaction<'a, Sqlite>;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref().expect(FINISHED)
    }
}

impl DerefMut for TransactionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut().expect(FINISHED)
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if self.inner.is_some() {
            tracing::warn!("Transaction guard dropped while open; rolling back");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_pool;

    async fn file_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM receipt_file")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn insert_file(tx: &mut TransactionGuard<'_>) {
        sqlx::query(
            "INSERT INTO receipt_file (file_name, file_path, is_processed, created_at, updated_at) \
             VALUES ('a.pdf', 'k/a.pdf', FALSE, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)",
        )
        .execute(&mut ***tx)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_commit_persists_and_rollback_discards() {
        let (_dir, pool) = test_pool().await;

        let mut tx = TransactionGuard::begin(&pool).await.unwrap();
        insert_file(&mut tx).await;
        tx.rollback().await.unwrap();
        assert_eq!(file_count(&pool).await, 0);

        let mut tx = TransactionGuard::begin(&pool).await.unwrap();
        insert_file(&mut tx).await;
        tx.commit().await.unwrap();
        assert_eq!(file_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_dropped_guard_rolls_back() {
        let (_dir, pool) = test_pool().await;

        {
            let mut tx = TransactionGuard::begin(&pool).await.unwrap();
            insert_file(&mut tx).await;
        }

        assert_eq!(file_count(&pool).await, 0);
    }
}
