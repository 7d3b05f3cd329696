// ABOUTME: Filesystem storage for admin-uploaded files such as product images
// ABOUTME: Stores files as {unix_seconds}_{name} under the upload directory with size and name checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::UploadConfig;
use crate::constants::{error_messages, paths};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Response body for a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUpload {
    /// Name under which the file was stored
    pub filename: String,
    /// Public URL path of the file
    pub url: String,
    /// Size in bytes
    pub size: u64,
}

/// Upload directory manager
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_size_bytes: u64,
}

impl UploadStore {
    /// Create a store rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, max_size_bytes: u64) -> Self {
        Self {
            root: root.into(),
            max_size_bytes,
        }
    }

    /// Create a store from the upload settings
    #[must_use]
    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(config.directory.clone(), config.max_size_bytes)
    }

    /// Directory holding the stored files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Largest accepted file in bytes
    #[must_use]
    pub const fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Create the upload directory if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub async fn ensure_root(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to create upload directory {}: {e}",
                self.root.display()
            ))
        })
    }

    /// Write `bytes` under a timestamp-prefixed version of `original_name`
    ///
    /// # Errors
    ///
    /// Returns a payload-too-large error for oversize files, invalid input
    /// for unsafe names, or a storage error if the write fails
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> AppResult<StoredUpload> {
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        if size > self.max_size_bytes {
            return Err(AppError::payload_too_large(error_messages::FILE_TOO_LARGE));
        }
        if !is_safe_file_name(original_name) {
            return Err(AppError::invalid_input(format!(
                "Invalid file name '{original_name}'"
            )));
        }

        let filename = format!("{}_{original_name}", Utc::now().timestamp());
        self.ensure_root().await?;
        tokio::fs::write(self.root.join(&filename), bytes)
            .await
            .map_err(|e| AppError::storage(format!("Failed to store upload: {e}")))?;

        info!(filename = %filename, size, "Stored upload");
        Ok(StoredUpload {
            url: format!("{}/{filename}", paths::UPLOADS_PREFIX),
            filename,
            size,
        })
    }

    /// Remove a stored file
    ///
    /// # Errors
    ///
    /// Returns not-found when the name is unsafe or no such file exists,
    /// or a storage error if removal fails
    pub async fn delete(&self, filename: &str) -> AppResult<()> {
        if !is_safe_file_name(filename) {
            return Err(AppError::not_found("File"));
        }

        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => {
                info!(filename = %filename, "Deleted upload");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::not_found("File")),
            Err(e) => Err(AppError::storage(format!("Failed to delete upload: {e}"))),
        }
    }
}

/// A plain file name: non-empty, no separators, no parent references
fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
        && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"), 1024);

        let stored = store.save("lamp.png", b"png-bytes").await.unwrap();
        assert!(stored.filename.ends_with("_lamp.png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.filename));
        assert_eq!(stored.size, 9);

        let on_disk = tokio::fs::read(store.root().join(&stored.filename))
            .await
            .unwrap();
        assert_eq!(on_disk, b"png-bytes");

        store.delete(&stored.filename).await.unwrap();
        let err = store.delete(&stored.filename).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_oversize_rejected_before_write() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path(), 4);

        let err = store.save("big.bin", b"12345").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PayloadTooLarge);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let dir = TempDir::new().unwrap();
        let store = UploadStore::new(dir.path(), 1024);

        for name in ["../escape.txt", "a/b.txt", "a\\b.txt", ""] {
            let err = store.save(name, b"x").await.unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput);
        }
        let err = store.delete("../Cargo.toml").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }
}
