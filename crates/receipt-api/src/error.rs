//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; any `AppError`
//! converts with `?` and renders as an [`ErrorResponse`] with the status from
//! its [`ErrorMetadata`].

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use receipt_core::{AppError, ErrorMetadata, LogLevel};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Client-safe message, e.g. "File not found in database".
    pub error: String,
    /// Error chain; omitted in production and for sensitive errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    pub code: String,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// `AppError` lives in receipt-core, so the response impl hangs off this newtype.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");
        HttpAppError(AppError::InvalidInput("Invalid request body".to_string()))
    }
}

/// JSON body extractor that deserializes, then runs `validator` rules.
///
/// Both failures become a 400 `INVALID_INPUT` in the usual [`ErrorResponse`] shape.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        inner.validate().map_err(AppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let kind = error.error_type();
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(%error, kind, code, "Request failed"),
        LogLevel::Warn => tracing::warn!(%error, kind, code, "Request rejected"),
        LogLevel::Error => tracing::error!(%error, kind, code, "Request failed"),
    }
}

/// Error details are never rendered when `ENVIRONMENT` (or `APP_ENV`) names production.
fn details_suppressed() -> bool {
    ["ENVIRONMENT", "APP_ENV"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .is_some_and(|env| matches!(env.to_ascii_lowercase().as_str(), "production" | "prod"))
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let show_details = !app_error.is_sensitive() && !details_suppressed();
        let body = ErrorResponse {
            error: app_error.client_message(),
            details: show_details.then(|| app_error.detailed_message()),
            error_type: show_details.then(|| app_error.error_type().to_string()),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_message_and_code() {
        let response =
            HttpAppError(AppError::NotFound("Receipt not found".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Receipt not found");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["recoverable"], false);
    }

    #[tokio::test]
    async fn test_sensitive_errors_hide_details() {
        let response = HttpAppError(AppError::PersistenceFailure(
            "disk full at /var/uploads".to_string(),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to save file");
        assert!(json.get("details").is_none());
        assert!(!json.to_string().contains("/var/uploads"));
    }

    #[tokio::test]
    async fn test_stale_and_precondition_statuses() {
        let stale = HttpAppError(AppError::StaleReference("old".to_string())).into_response();
        assert_eq!(stale.status(), StatusCode::NOT_FOUND);

        let unvalidated =
            HttpAppError(AppError::PreconditionFailed("validate first".to_string()))
                .into_response();
        assert_eq!(unvalidated.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_environment_change_applies_to_next_response() {
        let not_found = || HttpAppError(AppError::NotFound("File not found".to_string()));

        std::env::set_var("ENVIRONMENT", "production");
        let json = body_json(not_found().into_response()).await;
        assert!(json.get("details").is_none());

        std::env::set_var("ENVIRONMENT", "development");
        let json = body_json(not_found().into_response()).await;
        assert_eq!(json["error_type"], "NotFound");
        assert!(json["details"].as_str().unwrap().contains("File not found"));

        std::env::remove_var("ENVIRONMENT");
    }
}
