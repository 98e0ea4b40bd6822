use crate::constants::UPLOAD_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::IntoResponse,
    Json,
};
use receipt_core::models::UploadResponse;
use receipt_core::AppError;
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart form accepted by `/upload` (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// The receipt, a `.pdf` file
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "receipts",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored and recorded", body = UploadResponse),
        (status = 400, description = "No file or not a PDF", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    )
)]
pub async fn upload_receipt_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected upload body");
        AppError::InvalidInput("No file uploaded".to_string())
    })?;

    let (file_name, data) = extract_upload(multipart).await?;
    let uploaded = state.intake.upload(&file_name, data).await?;

    Ok(Json(UploadResponse::from(uploaded)))
}

/// Pull the single `file` field out of the form. Other fields are ignored.
async fn extract_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;
        upload = Some((file_name, data));
    }

    upload.ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))
}
