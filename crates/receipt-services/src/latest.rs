use receipt_core::models::FileRecord;
use receipt_core::AppError;
use receipt_db::ReceiptFileRepository;

/// Fail with [`AppError::StaleReference`] unless `record` is the most recent
/// upload sharing its file name.
pub(crate) async fn ensure_latest_upload(
    files: &ReceiptFileRepository,
    record: &FileRecord,
    action: &str,
) -> Result<(), AppError> {
    let latest = files.latest_id_for_name(&record.file_name).await?;
    if latest != Some(record.id) {
        tracing::debug!(
            file_id = record.id,
            latest_id = ?latest,
            file_name = %record.file_name,
            "Rejecting superseded upload"
        );
        return Err(AppError::StaleReference(format!(
            "Outdated file_id. Please {} the latest uploaded version of this file.",
            action
        )));
    }
    Ok(())
}
