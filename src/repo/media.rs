//! Image path resolution and MIME type inference.
//!
//! Resolution joins validated `folder`/`filename` parts onto the static root,
//! then canonicalizes the result and verifies it still lives under the
//! canonicalized root. A path that escapes the root is reported as missing,
//! not as a distinct error, so probing reveals nothing about the tree outside
//! the root.

use std::path::{Path, PathBuf};

use mime_guess::Mime;

use crate::error::ApiError;

/// Resolve a validated (folder, filename) pair to an absolute path under `root`.
///
/// Fails with `NotFound` when the joined path does not exist, is not a regular
/// file, or resolves outside the static root.
pub async fn resolve_image(root: &Path, folder: &str, filename: &str) -> Result<PathBuf, ApiError> {
    let candidate = root.join(folder).join(filename);

    let metadata = match tokio::fs::metadata(&candidate).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound("file not found".to_string()));
        }
        Err(e) => return Err(ApiError::Internal(format!("failed to stat file: {}", e))),
    };
    if !metadata.is_file() {
        return Err(ApiError::NotFound("file not found".to_string()));
    }

    // Containment check: symlinks or residual dot segments must not let the
    // resolved path leave the root.
    let canonical_root = tokio::fs::canonicalize(root)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to canonicalize root: {}", e)))?;
    let canonical = tokio::fs::canonicalize(&candidate)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to canonicalize path: {}", e)))?;

    if !canonical.starts_with(&canonical_root) {
        return Err(ApiError::NotFound("file not found".to_string()));
    }

    Ok(canonical)
}

/// Infer a MIME type from a filename's extension, defaulting to
/// `application/octet-stream` when inference fails.
pub fn guess_mime(path: &Path) -> Mime {
    mime_guess::from_path(path).first_or_octet_stream()
}

// =============================================================================
// Tests
// =============================================================================
