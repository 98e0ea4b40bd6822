//! Receipt Core Library
//!
//! This crate provides the domain models, error types and configuration
//! shared by the storage, database, workflow and HTTP crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ReceiptServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
