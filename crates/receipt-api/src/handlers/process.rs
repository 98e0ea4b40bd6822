use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use receipt_core::models::{FileReference, ProcessResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/process",
    tag = "receipts",
    request_body = FileReference,
    responses(
        (status = 200, description = "Receipt extracted, or the stored one if already processed", body = ProcessResponse),
        (status = 400, description = "Invalid request body or file not validated", body = ErrorResponse),
        (status = 404, description = "Unknown file, superseded upload, or missing on disk", body = ErrorResponse),
        (status = 500, description = "Extraction or persistence failure", body = ErrorResponse)
    )
)]
pub async fn process_receipt_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<FileReference>,
) -> Result<Json<ProcessResponse>, HttpAppError> {
    let processed = state
        .processor
        .process(body.file_id, &body.file_name)
        .await?;

    Ok(Json(ProcessResponse::from(processed)))
}
