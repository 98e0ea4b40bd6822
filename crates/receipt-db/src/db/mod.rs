//! Database repositories for data access layer
//!
//! One repository per table. Repositories hold a cloned pool and are passed
//! explicitly to the services that need them.

pub mod receipt;
pub mod receipt_file;
pub mod transaction;

pub use receipt::{ClaimOutcome, ReceiptRepository};
pub use receipt_file::ReceiptFileRepository;
