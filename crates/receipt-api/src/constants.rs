//! API constants

/// Multipart field carrying the uploaded receipt.
pub const UPLOAD_FIELD: &str = "file";

/// Path of the served OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Path of the RapiDoc UI.
pub const DOCS_PATH: &str = "/docs";

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str =
    "receipt_api=debug,receipt_services=debug,receipt_db=info,tower_http=debug";
