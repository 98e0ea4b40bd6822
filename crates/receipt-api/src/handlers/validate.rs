use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use receipt_core::models::{FileReference, ValidationResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/validate",
    tag = "receipts",
    request_body = FileReference,
    responses(
        (status = 200, description = "Validation verdict, valid or not", body = ValidationResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "Unknown file or superseded upload", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn validate_receipt_file(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<FileReference>,
) -> Result<Json<ValidationResponse>, HttpAppError> {
    let outcome = state
        .validator
        .validate(body.file_id, &body.file_name)
        .await?;

    Ok(Json(outcome))
}
