//! Storage key generation.
//!
//! Key format: `{uuid}/{sanitized_file_name}`.

use uuid::Uuid;

const MAX_FILE_NAME_LENGTH: usize = 255;

/// Generate a fresh storage key for an uploaded file.
pub fn generate_storage_key(file_name: &str) -> String {
    format!("{}/{}", Uuid::new_v4().simple(), sanitize_file_name(file_name))
}

/// Reduce a client-supplied file name to a single safe path component.
///
/// Directory parts are dropped, characters outside `[A-Za-z0-9._-]` become `_`,
/// and names that end up empty or made only of dots fall back to `file`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let last_component = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);

    let sanitized: String = last_component
        .chars()
        .take(MAX_FILE_NAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches('.').is_empty() || sanitized.contains("..") {
        return "file".to_string();
    }

    sanitized
}
