use receipt_core::models::{FileRecord, ProcessedReceipt};
use receipt_core::AppError;
use receipt_db::{ClaimOutcome, ReceiptFileRepository, ReceiptRepository};
use receipt_storage::Storage;
use std::sync::Arc;

use crate::errors::storage_read_error;
use crate::extractor::{ExtractionContext, ReceiptExtractor};
use crate::latest::ensure_latest_upload;

/// Turns validated files into stored receipts, at most once per file.
#[derive(Clone)]
pub struct ReceiptProcessor {
    files: ReceiptFileRepository,
    receipts: ReceiptRepository,
    storage: Arc<dyn Storage>,
    extractor: Arc<dyn ReceiptExtractor>,
}

impl ReceiptProcessor {
    pub fn new(
        files: ReceiptFileRepository,
        receipts: ReceiptRepository,
        storage: Arc<dyn Storage>,
        extractor: Arc<dyn ReceiptExtractor>,
    ) -> Self {
        Self {
            files,
            receipts,
            storage,
            extractor,
        }
    }

    /// Extract and store the receipt for the latest upload named `file_name`.
    ///
    /// A file that was already processed yields its stored receipt with
    /// `already_processed` set. Concurrent calls for the same file store a
    /// single receipt; the losers return the winner's.
    #[tracing::instrument(
        skip(self),
        fields(file.id = file_id, file.name = %file_name, extractor = %self.extractor.name())
    )]
    pub async fn process(
        &self,
        file_id: i64,
        file_name: &str,
    ) -> Result<ProcessedReceipt, AppError> {
        let record = self
            .files
            .find_by_id_and_name(file_id, file_name)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found in database".to_string()))?;

        ensure_latest_upload(&self.files, &record, "process").await?;

        if !self
            .storage
            .exists(&record.file_path)
            .await
            .map_err(storage_read_error)?
        {
            return Err(AppError::NotFound(
                "File does not exist on disk".to_string(),
            ));
        }

        if !record.is_validated_ok() {
            return Err(AppError::PreconditionFailed(
                "File is not valid. Please validate it before processing.".to_string(),
            ));
        }

        if record.is_processed {
            return self.stored_receipt(&record).await;
        }

        let extracted = self
            .extractor
            .extract(ExtractionContext {
                file_id: record.id,
                file_path: record.file_path.clone(),
                storage: self.storage.clone(),
            })
            .await
            .map_err(|e| AppError::ExtractionFailed(format!("{:#}", e)))?;

        match self
            .receipts
            .create_for_file(record.id, &record.file_path, &extracted)
            .await?
        {
            ClaimOutcome::Created(receipt) => {
                tracing::info!(
                    file_id = record.id,
                    receipt_id = receipt.id,
                    "Receipt processed"
                );
                Ok(ProcessedReceipt {
                    receipt,
                    already_processed: false,
                })
            }
            ClaimOutcome::AlreadyClaimed => {
                tracing::debug!(file_id = record.id, "Lost processing race, returning stored receipt");
                self.stored_receipt(&record).await
            }
        }
    }

    async fn stored_receipt(&self, record: &FileRecord) -> Result<ProcessedReceipt, AppError> {
        let receipt = self
            .receipts
            .find_by_file_path(&record.file_path)
            .await?
            .ok_or_else(|| {
                AppError::InconsistentState(format!(
                    "File {} is marked processed but has no receipt for {}",
                    record.id, record.file_path
                ))
            })?;

        Ok(ProcessedReceipt {
            receipt,
            already_processed: true,
        })
    }
}
