use receipt_core::AppError;
use receipt_storage::StorageError;

/// Map a failed write to the content store.
pub(crate) fn storage_write_error(err: StorageError) -> AppError {
    match err {
        StorageError::Unavailable(msg) => AppError::StorageUnavailable(msg),
        other => AppError::PersistenceFailure(other.to_string()),
    }
}

/// Map a failed read from the content store. Callers that treat a missing
/// file specially must match [`StorageError::NotFound`] before calling this.
pub(crate) fn storage_read_error(err: StorageError) -> AppError {
    match err {
        StorageError::Unavailable(msg) => AppError::StorageUnavailable(msg),
        StorageError::NotFound(key) => AppError::NotFound(format!("Stored file {} not found", key)),
        other => AppError::Internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_errors() {
        assert!(matches!(
            storage_write_error(StorageError::Unavailable("no dir".into())),
            AppError::StorageUnavailable(_)
        ));
        assert!(matches!(
            storage_write_error(StorageError::UploadFailed("disk full".into())),
            AppError::PersistenceFailure(_)
        ));
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            storage_read_error(StorageError::NotFound("k".into())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            storage_read_error(StorageError::InvalidKey("..".into())),
            AppError::Internal(_)
        ));
    }
}
