use receipt_core::models::ReceiptRecord;
use receipt_core::AppError;
use receipt_db::ReceiptRepository;

/// Read access to stored receipts.
#[derive(Clone)]
pub struct ReceiptReader {
    receipts: ReceiptRepository,
}

impl ReceiptReader {
    pub fn new(receipts: ReceiptRepository) -> Self {
        Self { receipts }
    }

    pub async fn list_all(&self) -> Result<Vec<ReceiptRecord>, AppError> {
        self.receipts.list_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<ReceiptRecord, AppError> {
        self.receipts
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receipt not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_env;
    use receipt_core::models::ExtractedReceipt;
    use receipt_db::{ClaimOutcome, ReceiptFileRepository};

    #[tokio::test]
    async fn test_list_and_get() {
        let env = test_env().await;
        let files = ReceiptFileRepository::new(env.pool.clone());
        let receipts = ReceiptRepository::new(env.pool.clone());
        let reader = ReceiptReader::new(receipts.clone());

        assert!(reader.list_all().await.unwrap().is_empty());
        let err = reader.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Receipt not found"));

        let mut ids = Vec::new();
        for name in ["a.pdf", "b.pdf"] {
            let file = files.create(name, &format!("k/{name}")).await.unwrap();
            let extracted = ExtractedReceipt {
                merchant_name: format!("Store {name}"),
                total_amount: 12.5,
                purchased_at: "2025-01-01T00:00:00Z".to_string(),
            };
            match receipts
                .create_for_file(file.id, &file.file_path, &extracted)
                .await
                .unwrap()
            {
                ClaimOutcome::Created(receipt) => ids.push(receipt.id),
                ClaimOutcome::AlreadyClaimed => panic!("fresh file must be claimable"),
            }
        }

        let all = reader.list_all().await.unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), ids);

        let second = reader.get_by_id(ids[1]).await.unwrap();
        assert_eq!(second.merchant_name, "Store b.pdf");
        assert_eq!(second.file_path, "k/b.pdf");
    }
}
