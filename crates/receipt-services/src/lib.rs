//! Receipt Services Layer
//!
//! Business services for the receipt workflow: intake of uploaded files,
//! validation of stored bytes, extraction and persistence of receipts, and
//! read access to stored receipts. HTTP handling stays in `receipt-api`; each
//! service here is built from repositories and a [`Storage`] handle and returns
//! [`AppError`](receipt_core::AppError) on failure.

pub mod extractor;
pub mod intake;
pub mod processor;
pub mod reader;
pub mod validator;

mod errors;
mod latest;

pub use extractor::{ExtractionContext, ReceiptExtractor, StubExtractor};
pub use intake::FileIntake;
pub use processor::ReceiptProcessor;
pub use reader::ReceiptReader;
pub use receipt_storage::{LocalStorage, Storage, StorageError, StorageResult};
pub use validator::FileValidator;
