use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use receipt_core::models::{ReceiptListResponse, ReceiptRecord};
use receipt_core::AppError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/receipts",
    tag = "receipts",
    responses(
        (status = 200, description = "All stored receipts", body = ReceiptListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_receipts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReceiptListResponse>, HttpAppError> {
    let receipts = state.reader.list_all().await?;
    Ok(Json(ReceiptListResponse { receipts }))
}

#[utoipa::path(
    get,
    path = "/receipts/{id}",
    tag = "receipts",
    params(
        ("id" = i64, Path, description = "Receipt ID")
    ),
    responses(
        (status = 200, description = "Receipt found", body = ReceiptRecord),
        (status = 400, description = "Malformed receipt ID", body = ErrorResponse),
        (status = 404, description = "Receipt not found", body = ErrorResponse)
    )
)]
pub async fn get_receipt(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ReceiptRecord>, HttpAppError> {
    let Path(id) = id.map_err(|_| AppError::InvalidInput("Invalid receipt ID".to_string()))?;
    let receipt = state.reader.get_by_id(id).await?;
    Ok(Json(receipt))
}
