use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Data extracted from one processed receipt file.
///
/// `file_path` matches the `receipt_file.file_path` it was produced from.
/// `purchased_at` is kept exactly as the extractor reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReceiptRecord {
    pub id: i64,
    pub purchased_at: String,
    pub merchant_name: String,
    pub total_amount: f64,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields produced by a receipt extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReceipt {
    pub merchant_name: String,
    pub total_amount: f64,
    pub purchased_at: String,
}

/// Result of processing a file: the stored receipt and whether it existed before this call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedReceipt {
    pub receipt: ReceiptRecord,
    pub already_processed: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponse {
    pub message: String,
    pub merchant_name: String,
    pub total_amount: f64,
    pub purchased_at: String,
    pub already_processed: bool,
}

impl From<ProcessedReceipt> for ProcessResponse {
    fn from(processed: ProcessedReceipt) -> Self {
        let message = if processed.already_processed {
            "Receipt was already processed"
        } else {
            "Receipt processed successfully"
        };
        ProcessResponse {
            message: message.to_string(),
            merchant_name: processed.receipt.merchant_name,
            total_amount: processed.receipt.total_amount,
            purchased_at: processed.receipt.purchased_at,
            already_processed: processed.already_processed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReceiptListResponse {
    pub receipts: Vec<ReceiptRecord>,
}
