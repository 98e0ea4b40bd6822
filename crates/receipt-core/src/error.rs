//! Error types module
//!
//! All failures of the receipt workflow are unified under [`AppError`]. Each
//! variant describes its own HTTP presentation through [`ErrorMetadata`], so the
//! API layer can render a response without matching on variants itself.
//!
//! Without the `sqlx` feature, `Database` carries a plain message instead of the driver error.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Severity used when an error reaches the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected client errors: bad input, unknown ids.
    Debug,
    /// Client mistakes worth noticing, e.g. stale ids or unvalidated files.
    Warn,
    /// Server-side failures.
    Error,
}

/// Presentation of an error to HTTP clients.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable code such as `"STALE_REFERENCE"`.
    fn error_code(&self) -> &'static str;

    /// True when retrying the same request may succeed.
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to send to clients; generic for sensitive errors.
    fn client_message(&self) -> String;

    /// Sensitive errors never expose their internal details.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Stale reference: {0}")]
    StaleReference(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Inconsistent state: {0}")]
    InconsistentState(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Receipt extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// How one kind of error is presented to clients and logs.
#[derive(Debug, Clone, Copy)]
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    log_level: LogLevel,
}

const RETRY_SHORTLY: Option<&str> = Some("Retry after a short delay");

const DATABASE: Presentation = Presentation {
    status: 500,
    code: "DATABASE_ERROR",
    recoverable: true,
    action: RETRY_SHORTLY,
    sensitive: true,
    log_level: LogLevel::Error,
};

const INVALID_INPUT: Presentation = Presentation {
    status: 400,
    code: "INVALID_INPUT",
    recoverable: false,
    action: Some("Check request parameters and try again"),
    sensitive: false,
    log_level: LogLevel::Debug,
};

const NOT_FOUND: Presentation = Presentation {
    status: 404,
    code: "NOT_FOUND",
    recoverable: false,
    action: Some("Verify the file or receipt ID exists"),
    sensitive: false,
    log_level: LogLevel::Debug,
};

const STALE_REFERENCE: Presentation = Presentation {
    status: 404,
    code: "STALE_REFERENCE",
    recoverable: false,
    action: Some("Use the file_id of the latest upload with this name"),
    sensitive: false,
    log_level: LogLevel::Warn,
};

const PRECONDITION_FAILED: Presentation = Presentation {
    status: 400,
    code: "PRECONDITION_FAILED",
    recoverable: false,
    action: Some("Validate the file before processing it"),
    sensitive: false,
    log_level: LogLevel::Warn,
};

const INCONSISTENT_STATE: Presentation = Presentation {
    status: 500,
    code: "INCONSISTENT_STATE",
    recoverable: false,
    action: Some("Contact support if this error persists"),
    sensitive: true,
    log_level: LogLevel::Error,
};

const STORAGE_UNAVAILABLE: Presentation = Presentation {
    status: 500,
    code: "STORAGE_UNAVAILABLE",
    recoverable: true,
    action: RETRY_SHORTLY,
    sensitive: true,
    log_level: LogLevel::Error,
};

const PERSISTENCE_FAILURE: Presentation = Presentation {
    status: 500,
    code: "PERSISTENCE_FAILURE",
    recoverable: true,
    action: RETRY_SHORTLY,
    sensitive: true,
    log_level: LogLevel::Error,
};

const EXTRACTION_FAILED: Presentation = Presentation {
    status: 500,
    code: "EXTRACTION_FAILED",
    recoverable: true,
    action: Some("Retry processing after a short delay"),
    sensitive: true,
    log_level: LogLevel::Error,
};

const INTERNAL: Presentation = Presentation {
    status: 500,
    code: "INTERNAL_ERROR",
    recoverable: true,
    action: RETRY_SHORTLY,
    sensitive: true,
    log_level: LogLevel::Error,
};

impl AppError {
    fn presentation(&self) -> &'static Presentation {
        match self {
            AppError::Database(_) => &DATABASE,
            AppError::InvalidInput(_) => &INVALID_INPUT,
            AppError::NotFound(_) => &NOT_FOUND,
            AppError::StaleReference(_) => &STALE_REFERENCE,
            AppError::PreconditionFailed(_) => &PRECONDITION_FAILED,
            AppError::InconsistentState(_) => &INCONSISTENT_STATE,
            AppError::StorageUnavailable(_) => &STORAGE_UNAVAILABLE,
            AppError::PersistenceFailure(_) => &PERSISTENCE_FAILURE,
            AppError::ExtractionFailed(_) => &EXTRACTION_FAILED,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => &INTERNAL,
        }
    }
}

impl AppError {
    /// Variant name reported as `error_type` in non-production responses.
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::StaleReference(_) => "StaleReference",
            AppError::PreconditionFailed(_) => "PreconditionFailed",
            AppError::InconsistentState(_) => "InconsistentState",
            AppError::StorageUnavailable(_) => "StorageUnavailable",
            AppError::PersistenceFailure(_) => "PersistenceFailure",
            AppError::ExtractionFailed(_) => "ExtractionFailed",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Display text followed by up to five `Caused by:` lines from the source chain.
    pub fn detailed_message(&self) -> String {
        const MAX_CAUSES: usize = 5;

        let causes: Vec<String> =
            std::iter::successors(std::error::Error::source(self), |err| err.source())
                .take(MAX_CAUSES + 1)
                .map(|err| err.to_string())
                .collect();

        let mut details = self.to_string();
        for cause in causes.iter().take(MAX_CAUSES) {
            details.push_str("\n  Caused by: ");
            details.push_str(cause);
        }
        if causes.len() > MAX_CAUSES {
            details.push_str("\n  ... (truncated)");
        }
        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().log_level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::StaleReference(ref msg) => msg.clone(),
            AppError::PreconditionFailed(ref msg) => msg.clone(),
            AppError::InconsistentState(_) => {
                "Receipt already processed, but its extracted data is missing".to_string()
            }
            AppError::StorageUnavailable(_) => "Could not create upload directory".to_string(),
            AppError::PersistenceFailure(_) => "Failed to save file".to_string(),
            AppError::ExtractionFailed(_) => "Failed to extract receipt data".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
