//! Request input validation.
//!
//! Pure functions over raw `folder`/`filename` strings. On success the
//! original strings pass through unmodified; the only normalization applied
//! anywhere is the case-insensitive extension comparison.

use crate::error::ApiError;

/// File extensions accepted by the image request validator.
///
/// Note: wider than [`crate::repo::LISTED_IMAGE_EXTENSIONS`], the filter used
/// when listing a folder. Unifying the two sets is pending product
/// clarification; do not silently merge them.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 9] = [
    "png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp", "svg", "ico",
];

/// Reject strings that could address anything outside the static root.
///
/// A folder or filename is a single path component; separators, NUL bytes,
/// and the `.`/`..` pseudo-components are never legitimate in one.
fn check_single_component(value: &str, what: &str) -> Result<(), ApiError> {
    if value.contains('/') || value.contains('\\') || value.contains('\0') {
        return Err(ApiError::Validation(format!(
            "{} must not contain path separators",
            what
        )));
    }
    if value == "." || value == ".." {
        return Err(ApiError::Validation(format!(
            "{} must not be a relative path segment",
            what
        )));
    }
    Ok(())
}

/// Validate a folder name: non-empty after trimming, single path component.
pub fn validate_folder(folder: &str) -> Result<(), ApiError> {
    if folder.trim().is_empty() {
        return Err(ApiError::Validation(
            "folder name must not be empty".to_string(),
        ));
    }
    check_single_component(folder, "folder name")
}

/// Validate an image filename: single path component with an allowed
/// extension (the substring after the last `.`, compared case-insensitively).
pub fn validate_filename(filename: &str) -> Result<(), ApiError> {
    check_single_component(filename, "filename")?;

    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => {
            return Err(ApiError::Validation(format!(
                "'{}' is not a valid image filename. Allowed extensions: {}",
                filename,
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            )));
        }
    };

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::Validation(format!(
            "'{}' is not a valid image filename. Allowed extensions: {}",
            filename,
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
