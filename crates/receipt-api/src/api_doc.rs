//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use receipt_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Receipt API",
        version = "0.1.0",
        description = "Receipt intake service: upload PDF receipts, validate them, extract and store receipt data."
    ),
    paths(
        handlers::root::hello,
        handlers::upload::upload_receipt_file,
        handlers::validate::validate_receipt_file,
        handlers::process::process_receipt_file,
        handlers::receipts::list_receipts,
        handlers::receipts::get_receipt,
    ),
    components(
        schemas(
            error::ErrorResponse,
            handlers::root::HelloResponse,
            handlers::upload::UploadForm,
            models::UploadResponse,
            models::FileReference,
            models::ValidationResponse,
            models::ProcessResponse,
            models::ReceiptRecord,
            models::ReceiptListResponse,
        )
    ),
    tags(
        (name = "receipts", description = "Receipt upload, validation and processing"),
        (name = "meta", description = "Service information")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_workflow_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/upload",
            "/validate",
            "/process",
            "/receipts",
            "/receipts/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
