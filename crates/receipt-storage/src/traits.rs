//! Content store seam
//!
//! Services talk to uploaded bytes only through [`Storage`]; the database keeps
//! the returned key and nothing else about where the bytes live.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the bytes failed after the target directory existed.
    #[error("could not write {0}")]
    UploadFailed(String),

    #[error("could not read {0}")]
    DownloadFailed(String),

    #[error("could not remove {0}")]
    DeleteFailed(String),

    #[error("no stored file at {0}")]
    NotFound(String),

    /// Empty key, absolute path, or a `..` component.
    #[error("rejected storage key {0:?}")]
    InvalidKey(String),

    /// The root or per-upload directory cannot be created or reached.
    #[error("storage root unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under a fresh key derived from `file_name` and return the key.
    async fn upload(&self, file_name: &str, data: Bytes) -> StorageResult<String>;

    /// Read at most `len` bytes from the start of a file.
    ///
    /// Files shorter than `len` yield all of their bytes. A missing file is
    /// reported as [`StorageError::NotFound`].
    async fn read_prefix(&self, storage_key: &str, len: usize) -> StorageResult<Vec<u8>>;

    /// Read a whole file.
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file. Deleting a missing file succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Fails with [`StorageError::Unavailable`] when the backend cannot serve requests.
    async fn health_check(&self) -> StorageResult<()>;
}
