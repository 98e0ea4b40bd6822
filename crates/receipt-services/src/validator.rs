use receipt_core::models::ValidationResponse;
use receipt_core::AppError;
use receipt_db::ReceiptFileRepository;
use receipt_storage::{Storage, StorageError};
use std::sync::Arc;

use crate::errors::storage_read_error;
use crate::latest::ensure_latest_upload;

/// Leading bytes every PDF file starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

pub const REASON_NOT_ON_DISK: &str = "File not found on disk";
pub const REASON_INVALID_PDF: &str = "Invalid PDF format";

/// Checks stored files and records whether they are usable PDFs.
#[derive(Clone)]
pub struct FileValidator {
    files: ReceiptFileRepository,
    storage: Arc<dyn Storage>,
}

impl FileValidator {
    pub fn new(files: ReceiptFileRepository, storage: Arc<dyn Storage>) -> Self {
        Self { files, storage }
    }

    /// Validate the latest upload named `file_name`.
    ///
    /// An unknown `(file_id, file_name)` pair is `NotFound` and a superseded upload
    /// is `StaleReference`; neither touches the record. Otherwise the verdict is
    /// written back (overwriting any earlier one) and returned, including when the
    /// stored bytes are missing or do not start with `%PDF-`.
    #[tracing::instrument(skip(self), fields(file.id = file_id, file.name = %file_name))]
    pub async fn validate(
        &self,
        file_id: i64,
        file_name: &str,
    ) -> Result<ValidationResponse, AppError> {
        let record = self
            .files
            .find_by_id_and_name(file_id, file_name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("File with given ID and name does not exist".to_string())
            })?;

        ensure_latest_upload(&self.files, &record, "validate").await?;

        let invalid_reason = match self
            .storage
            .read_prefix(&record.file_path, PDF_MAGIC.len())
            .await
        {
            Ok(header) if header == PDF_MAGIC => None,
            Ok(_) => Some(REASON_INVALID_PDF),
            Err(StorageError::NotFound(_)) => Some(REASON_NOT_ON_DISK),
            Err(e) => return Err(storage_read_error(e)),
        };
        let is_valid = invalid_reason.is_none();

        self.files
            .update_validation(record.id, is_valid, invalid_reason)
            .await?;

        tracing::info!(file_id = record.id, is_valid, reason = ?invalid_reason, "File validated");

        Ok(ValidationResponse {
            file_id: record.id,
            file_name: record.file_name,
            is_valid,
            invalid_reason: invalid_reason.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::FileIntake;
    use crate::test_support::{test_env, TestEnv, PDF_BYTES};
    use bytes::Bytes;

    fn services(env: &TestEnv) -> (FileIntake, FileValidator, ReceiptFileRepository) {
        let files = ReceiptFileRepository::new(env.pool.clone());
        (
            FileIntake::new(files.clone(), env.storage.clone()),
            FileValidator::new(files.clone(), env.storage.clone()),
            files,
        )
    }

    #[tokio::test]
    async fn test_valid_pdf() {
        let env = test_env().await;
        let (intake, validator, files) = services(&env);
        let uploaded = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap();

        let outcome = validator
            .validate(uploaded.file_id, "receipt.pdf")
            .await
            .unwrap();
        assert!(outcome.is_valid);
        assert_eq!(outcome.invalid_reason, None);

        let record = files
            .find_by_id_and_name(uploaded.file_id, "receipt.pdf")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.is_valid, Some(true));
        assert_eq!(record.invalid_reason, None);
    }

    #[tokio::test]
    async fn test_invalid_header_and_short_files() {
        let env = test_env().await;
        let (intake, validator, _) = services(&env);

        for (name, bytes) in [
            ("text.pdf", &b"hello world"[..]),
            ("short.pdf", &b"%PD"[..]),
            ("empty.pdf", &b""[..]),
        ] {
            let uploaded = intake
                .upload(name, Bytes::copy_from_slice(bytes))
                .await
                .unwrap();
            let outcome = validator.validate(uploaded.file_id, name).await.unwrap();
            assert!(!outcome.is_valid, "{name} should be invalid");
            assert_eq!(outcome.invalid_reason.as_deref(), Some(REASON_INVALID_PDF));
        }
    }

    #[tokio::test]
    async fn test_missing_file_on_disk_is_recorded_invalid() {
        let env = test_env().await;
        let (intake, validator, files) = services(&env);
        let uploaded = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap();
        env.storage.delete(&uploaded.file_path).await.unwrap();

        let outcome = validator
            .validate(uploaded.file_id, "receipt.pdf")
            .await
            .unwrap();
        assert!(!outcome.is_valid);
        assert_eq!(outcome.invalid_reason.as_deref(), Some(REASON_NOT_ON_DISK));

        let record = files
            .find_by_id_and_name(uploaded.file_id, "receipt.pdf")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.is_valid, Some(false));
    }

    #[tokio::test]
    async fn test_unknown_and_stale_references() {
        let env = test_env().await;
        let (intake, validator, files) = services(&env);
        let first = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap();

        let err = validator.validate(first.file_id, "other.pdf").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let second = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap();

        let err = validator
            .validate(first.file_id, "receipt.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StaleReference(_)));

        let untouched = files
            .find_by_id_and_name(first.file_id, "receipt.pdf")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.is_valid, None);

        assert!(validator
            .validate(second.file_id, "receipt.pdf")
            .await
            .unwrap()
            .is_valid);
    }

    #[tokio::test]
    async fn test_revalidation_overwrites_verdict() {
        let env = test_env().await;
        let (intake, validator, _) = services(&env);
        let uploaded = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap();

        assert!(validator
            .validate(uploaded.file_id, "receipt.pdf")
            .await
            .unwrap()
            .is_valid);

        env.storage.delete(&uploaded.file_path).await.unwrap();
        let again = validator
            .validate(uploaded.file_id, "receipt.pdf")
            .await
            .unwrap();
        assert!(!again.is_valid);
    }
}
