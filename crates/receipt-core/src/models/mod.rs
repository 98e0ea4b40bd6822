//! Data models for the application
//!
//! `receipt_file` rows track uploaded files through validation and processing;
//! `receipt` rows hold what the extractor produced for a processed file.

mod receipt;
mod receipt_file;

pub use receipt::*;
pub use receipt_file::*;
