use bytes::Bytes;
use receipt_core::models::UploadedFile;
use receipt_core::AppError;
use receipt_db::ReceiptFileRepository;
use receipt_storage::Storage;
use std::path::Path;
use std::sync::Arc;

use crate::errors::storage_write_error;

/// Accepts uploaded receipt files: stores the bytes and records a `receipt_file` row.
#[derive(Clone)]
pub struct FileIntake {
    files: ReceiptFileRepository,
    storage: Arc<dyn Storage>,
}

impl FileIntake {
    pub fn new(files: ReceiptFileRepository, storage: Arc<dyn Storage>) -> Self {
        Self { files, storage }
    }

    #[tracing::instrument(skip(self, data), fields(file.name = %file_name, file.size = data.len()))]
    pub async fn upload(&self, file_name: &str, data: Bytes) -> Result<UploadedFile, AppError> {
        if file_name.trim().is_empty() {
            return Err(AppError::InvalidInput("No file uploaded".to_string()));
        }
        if !has_pdf_extension(file_name) {
            return Err(AppError::InvalidInput(
                "Only PDF files are allowed".to_string(),
            ));
        }

        let storage_key = self
            .storage
            .upload(file_name, data)
            .await
            .map_err(storage_write_error)?;

        let record = match self.files.create(file_name, &storage_key).await {
            Ok(record) => record,
            Err(e) => {
                // Nothing references the key once the insert has failed.
                if let Err(err) = self.storage.delete(&storage_key).await {
                    tracing::warn!(error = %err, key = %storage_key, "Failed to remove orphaned upload");
                }
                return Err(AppError::PersistenceFailure(format!(
                    "failed to record upload {}: {}",
                    storage_key, e
                )));
            }
        };

        tracing::info!(
            file_id = record.id,
            file_path = %record.file_path,
            "Receipt file uploaded"
        );

        Ok(record.into())
    }
}

fn has_pdf_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_env, PDF_BYTES};

    #[test]
    fn test_pdf_extension() {
        assert!(has_pdf_extension("receipt.pdf"));
        assert!(has_pdf_extension("receipt.PDF"));
        assert!(has_pdf_extension("scan.2025.Pdf"));
        assert!(!has_pdf_extension("receipt.png"));
        assert!(!has_pdf_extension("receipt"));
        assert!(!has_pdf_extension("receipt.pdf.exe"));
        assert!(!has_pdf_extension(".pdf"));
    }

    #[tokio::test]
    async fn test_upload_stores_bytes_and_record() {
        let env = test_env().await;
        let intake = FileIntake::new(
            ReceiptFileRepository::new(env.pool.clone()),
            env.storage.clone(),
        );

        let uploaded = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap();

        assert!(uploaded.file_id > 0);
        assert_eq!(uploaded.file_name, "receipt.pdf");
        assert!(uploaded.file_path.ends_with("/receipt.pdf"));
        assert_eq!(
            env.storage.download(&uploaded.file_path).await.unwrap(),
            PDF_BYTES
        );

        let record = ReceiptFileRepository::new(env.pool.clone())
            .find_by_id_and_name(uploaded.file_id, "receipt.pdf")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.is_valid, None);
        assert!(!record.is_processed);
    }

    #[tokio::test]
    async fn test_reupload_keeps_previous_bytes() {
        let env = test_env().await;
        let intake = FileIntake::new(
            ReceiptFileRepository::new(env.pool.clone()),
            env.storage.clone(),
        );

        let first = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap();
        let second = intake
            .upload("receipt.pdf", Bytes::from_static(b"not a pdf"))
            .await
            .unwrap();

        assert!(second.file_id > first.file_id);
        assert_ne!(first.file_path, second.file_path);
        assert_eq!(
            env.storage.download(&first.file_path).await.unwrap(),
            PDF_BYTES
        );
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_input() {
        let env = test_env().await;
        let intake = FileIntake::new(
            ReceiptFileRepository::new(env.pool.clone()),
            env.storage.clone(),
        );

        let err = intake.upload("", Bytes::new()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "No file uploaded"));

        let err = intake
            .upload("photo.png", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "Only PDF files are allowed"));
    }

    #[tokio::test]
    async fn test_failed_insert_removes_stored_bytes() {
        let env = test_env().await;
        let intake = FileIntake::new(
            ReceiptFileRepository::new(env.pool.clone()),
            env.storage.clone(),
        );
        sqlx::query("DROP TABLE receipt_file")
            .execute(&env.pool)
            .await
            .unwrap();

        let err = intake
            .upload("receipt.pdf", Bytes::from_static(PDF_BYTES))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PersistenceFailure(_)));

        let leftovers = std::fs::read_dir(env._dir.path().join("uploads"))
            .unwrap()
            .count();
        assert_eq!(leftovers, 0);
    }
}
