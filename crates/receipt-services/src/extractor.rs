//! Receipt extraction
//!
//! Extraction sits behind the [`ReceiptExtractor`] trait so a real OCR backend
//! can replace [`StubExtractor`] without touching the processing workflow.

use anyhow::Result;
use async_trait::async_trait;
use receipt_core::models::ExtractedReceipt;
use receipt_storage::Storage;
use std::fmt::Debug;
use std::sync::Arc;

/// Input handed to an extractor for one stored file.
#[derive(Clone)]
pub struct ExtractionContext {
    /// Id of the `receipt_file` row being processed
    pub file_id: i64,
    /// Storage key of the file's bytes
    pub file_path: String,
    /// Storage service for reading the file
    pub storage: Arc<dyn Storage>,
}

#[async_trait]
pub trait ReceiptExtractor: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Pull merchant, total and purchase time out of the stored file.
    async fn extract(&self, context: ExtractionContext) -> Result<ExtractedReceipt>;
}

/// Extractor that returns a fixed receipt without reading the file.
#[derive(Debug, Default, Clone)]
pub struct StubExtractor;

impl StubExtractor {
    pub const MERCHANT_NAME: &'static str = "Dummy Store";
    pub const TOTAL_AMOUNT: f64 = 100.0;
    pub const PURCHASED_AT: &'static str = "2025-06-27T15:04:05Z";
}

#[async_trait]
impl ReceiptExtractor for StubExtractor {
    fn name(&self) -> &str {
        "stub"
    }

    async fn extract(&self, context: ExtractionContext) -> Result<ExtractedReceipt> {
        tracing::debug!(
            file_id = context.file_id,
            file_path = %context.file_path,
            "Stub extraction"
        );

        Ok(ExtractedReceipt {
            merchant_name: Self::MERCHANT_NAME.to_string(),
            total_amount: Self::TOTAL_AMOUNT,
            purchased_at: Self::PURCHASED_AT.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_env;

    #[tokio::test]
    async fn test_stub_returns_fixed_receipt() {
        let env = test_env().await;
        let extracted = StubExtractor
            .extract(ExtractionContext {
                file_id: 1,
                file_path: "missing/receipt.pdf".to_string(),
                storage: env.storage.clone(),
            })
            .await
            .unwrap();

        assert_eq!(extracted.merchant_name, "Dummy Store");
        assert_eq!(extracted.total_amount, 100.0);
        assert_eq!(extracted.purchased_at, "2025-06-27T15:04:05Z");
        assert_eq!(StubExtractor.name(), "stub");
    }
}
