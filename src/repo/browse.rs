//! Filesystem browsing over the static root.
//!
//! [`ImageRepository`] enumerates immediate subdirectories of the root and
//! image files within one subdirectory. Readdir order is OS-dependent, so
//! both listings are sorted lexicographically to guarantee deterministic
//! ordering across platforms.

use std::path::{Path, PathBuf};

use crate::error::ApiError;

/// Lowercase filename suffixes included when listing a folder's images.
///
/// Narrower than [`crate::repo::ALLOWED_IMAGE_EXTENSIONS`]; see the note
/// there about the asymmetry.
pub const LISTED_IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// Read-only view of the static image directory tree.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    root: PathBuf,
}

impl ImageRepository {
    /// Create a repository rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The static root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the static root if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), ApiError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to create static root: {}", e)))
    }

    /// List the immediate subdirectories of the static root, sorted.
    ///
    /// A missing root maps to `NotFound`; any other I/O failure is a server
    /// error.
    pub async fn list_folders(&self) -> Result<Vec<String>, ApiError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ApiError::NotFound("static root not found".to_string()));
            }
            Err(e) => {
                return Err(ApiError::Internal(format!(
                    "failed to read static root: {}",
                    e
                )));
            }
        };

        let mut folders = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ApiError::Internal(format!("failed to read static root: {}", e)))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| ApiError::Internal(format!("failed to stat entry: {}", e)))?;
            if file_type.is_dir() {
                folders.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        folders.sort();
        Ok(folders)
    }

    /// List the image files directly inside `folder`, sorted.
    ///
    /// The folder name must already have passed [`crate::repo::validate_folder`].
    /// Only regular files whose lowercase name ends in one of
    /// [`LISTED_IMAGE_EXTENSIONS`] are returned; subdirectories and other file
    /// types are skipped.
    pub async fn list_images(&self, folder: &str) -> Result<Vec<String>, ApiError> {
        let folder_path = self.root.join(folder);

        let metadata = match tokio::fs::metadata(&folder_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ApiError::NotFound("folder not found".to_string()));
            }
            Err(e) => {
                return Err(ApiError::Internal(format!("failed to stat folder: {}", e)));
            }
        };
        if !metadata.is_dir() {
            return Err(ApiError::NotFound("folder not found".to_string()));
        }

        let mut entries = tokio::fs::read_dir(&folder_path)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to read folder: {}", e)))?;

        let mut images = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ApiError::Internal(format!("failed to read folder: {}", e)))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| ApiError::Internal(format!("failed to stat entry: {}", e)))?;
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let lower = name.to_lowercase();
            if LISTED_IMAGE_EXTENSIONS
                .iter()
                .any(|ext| lower.ends_with(ext))
            {
                images.push(name);
            }
        }

        images.sort();
        Ok(images)
    }
}

// =============================================================================
// Tests
// =============================================================================
