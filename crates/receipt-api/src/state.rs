//! Application state shared by all handlers.

use receipt_core::Config;
use receipt_db::{ReceiptFileRepository, ReceiptRepository};
use receipt_services::{
    FileIntake, FileValidator, ReceiptExtractor, ReceiptProcessor, ReceiptReader, Storage,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub storage: Arc<dyn Storage>,
    pub intake: FileIntake,
    pub validator: FileValidator,
    pub processor: ReceiptProcessor,
    pub reader: ReceiptReader,
}

impl AppState {
    /// Wire repositories and workflow services over one pool and one content store.
    pub fn new(
        config: Config,
        pool: SqlitePool,
        storage: Arc<dyn Storage>,
        extractor: Arc<dyn ReceiptExtractor>,
    ) -> Self {
        let files = ReceiptFileRepository::new(pool.clone());
        let receipts = ReceiptRepository::new(pool.clone());

        Self {
            intake: FileIntake::new(files.clone(), storage.clone()),
            validator: FileValidator::new(files.clone(), storage.clone()),
            processor: ReceiptProcessor::new(
                files,
                receipts.clone(),
                storage.clone(),
                extractor,
            ),
            reader: ReceiptReader::new(receipts),
            config,
            pool,
            storage,
        }
    }
}
