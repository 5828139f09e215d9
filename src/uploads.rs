//! On-disk image storage for product uploads.
//!
//! Uploaded files are renamed to a fresh UUID before hitting the disk, so
//! client-supplied names never become paths. Reads still guard against
//! separators and `..` because the serving route takes the filename from
//! the URL.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Accepted image file extensions
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Stores uploaded images under a single directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create store rooted at `root` (directory is created by [`Self::init`])
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it does not exist
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Upload directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Extract the extension if the filename carries an accepted one
    pub fn allowed_extension(filename: &str) -> Option<String> {
        let ext = filename.rsplit_once('.')?.1.to_lowercase();

        if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            Some(ext)
        } else {
            None
        }
    }

    /// Store image bytes under a fresh UUID filename.
    ///
    /// Returns the stored filename. Rejects files whose original name has
    /// no accepted extension.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let ext = Self::allowed_extension(original_name)
            .ok_or_else(|| StoreError::UnsupportedFormat(original_name.to_string()))?;

        let stored_name = format!("{}.{ext}", Uuid::new_v4().simple());
        tokio::fs::write(self.root.join(&stored_name), bytes).await?;

        Ok(stored_name)
    }

    /// Read a stored image back
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.safe_path(name)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound("Image"))
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a stored image, best-effort. A failure is logged, never
    /// surfaced: record deletion must not fail over a missing file.
    pub async fn remove(&self, name: &str) {
        let Ok(path) = self.safe_path(name) else {
            tracing::warn!("Refusing to delete suspicious image name: {name}");
            return;
        };

        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to delete image {name}: {e}");
            }
        }
    }

    /// Content type for a stored filename
    pub fn content_type(name: &str) -> &'static str {
        match name.rsplit_once('.').map(|(_, ext)| ext) {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }

    /// Resolve a filename inside the root, rejecting traversal attempts
    fn safe_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(StoreError::InvalidFilename(name.to_string()));
        }

        Ok(self.root.join(name))
    }
}
