//! Router assembly: endpoints, docs and the tower middleware stack.

mod health;

use anyhow::Context;
use crate::api_doc::ApiDoc;
use crate::constants::{DOCS_PATH, OPENAPI_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use receipt_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = config.http_concurrency_limit().max(1);
    tracing::info!(
        http_concurrency_limit,
        max_upload_size_bytes = config.max_upload_size_bytes(),
        "HTTP limits configured"
    );

    let app = Router::new()
        .route("/", get(handlers::root::hello))
        .route("/upload", post(handlers::upload::upload_receipt_file))
        .route("/validate", post(handlers::validate::validate_receipt_file))
        .route("/process", post(handlers::process::process_receipt_file))
        .route("/receipts", get(handlers::receipts::list_receipts))
        .route("/receipts/{id}", get(handlers::receipts::get_receipt))
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .with_state(state)
        .merge(RapiDoc::with_openapi(OPENAPI_PATH, ApiDoc::openapi()).path(DOCS_PATH))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// `*` anywhere in the origin list opens CORS to every origin.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origins = config.cors_origins();

    let allow_origin = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows any origin");
        AllowOrigin::any()
    } else {
        let parsed = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("CORS_ORIGINS entry {:?} is not a valid origin", origin))
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(parsed)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}
