//! Receipt Storage Library
//!
//! Content store for uploaded receipt files: the [`Storage`] trait and the
//! local filesystem backend.
//!
//! # Storage key format
//!
//! Every upload gets its own directory: `{uuid}/{sanitized_file_name}`. Uploading
//! the same file name twice therefore yields two distinct keys and never
//! overwrites earlier bytes. Keys must not contain `..` or a leading `/`.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
