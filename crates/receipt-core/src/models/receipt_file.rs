use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One uploaded file attempt.
///
/// Several records may share a `file_name`; the one with the highest `id` is the
/// latest upload and the only one that may be validated or processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FileRecord {
    pub id: i64,
    pub file_name: String,
    pub file_path: String,
    /// `None` until the file has been validated.
    pub is_valid: Option<bool>,
    pub invalid_reason: Option<String>,
    pub is_processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    pub fn is_validated_ok(&self) -> bool {
        self.is_valid == Some(true)
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_id: i64,
    pub file_name: String,
    pub file_path: String,
}

impl From<FileRecord> for UploadedFile {
    fn from(record: FileRecord) -> Self {
        UploadedFile {
            file_id: record.id,
            file_name: record.file_name,
            file_path: record.file_path,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub file_id: i64,
    pub file_name: String,
    pub file_path: String,
}

impl From<UploadedFile> for UploadResponse {
    fn from(file: UploadedFile) -> Self {
        UploadResponse {
            message: "File uploaded successfully".to_string(),
            file_id: file.file_id,
            file_name: file.file_name,
            file_path: file.file_path,
        }
    }
}

/// Body of `/validate` and `/process`: identifies one upload by id and name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct FileReference {
    #[validate(range(min = 1, message = "file_id must be a positive integer"))]
    pub file_id: i64,
    #[validate(length(min = 1, message = "file_name must not be empty"))]
    pub file_name: String,
}

/// Outcome of validating a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub file_id: i64,
    pub file_name: String,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
}
