//! Storage abstraction trait
//!
//! This module defines the Storage trait implemented by storage backends.
//!
//! **Public path format:** `/uploads/<category-dir>/<assigned_name>`. The
//! public path doubles as the externally exposed URL and the lookup key for
//! later deletion; any reference not carrying the `/uploads` prefix belongs
//! to an external host and is never touched.

use crate::category::UploadCategory;
use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid public path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for wayfarer_core::AppError {
    fn from(err: StorageError) -> Self {
        use wayfarer_core::AppError;
        match err {
            StorageError::WriteFailed(msg) => AppError::Filesystem(msg),
            StorageError::DeleteFailed(msg) => AppError::Filesystem(msg),
            StorageError::InvalidPath(msg) => AppError::InvalidInput(msg),
            StorageError::IoError(err) => AppError::Filesystem(format!("IO error: {}", err)),
        }
    }
}

/// Descriptor of a stored file, returned by a successful write.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub category: UploadCategory,
    pub original_name: String,
    pub assigned_name: String,
    /// `/uploads/<category-dir>/<assigned_name>`
    pub public_path: String,
    pub size_bytes: usize,
    pub content_type: String,
}

/// Storage abstraction trait
///
/// Backends allocate a collision-resistant destination for validated upload
/// bytes and reclaim previously allocated files by their public path.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a validated file into the category's directory under a freshly
    /// assigned name and return its descriptor.
    async fn store(
        &self,
        category: UploadCategory,
        original_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredFile>;

    /// Delete the file a locally-managed public path points at.
    ///
    /// Returns `Ok(true)` if a file was removed, `Ok(false)` if the path is
    /// not locally managed or the file is already gone. Deleting an absent
    /// file is not an error.
    async fn delete_by_public_path(&self, public_path: &str) -> StorageResult<bool>;

    /// Check whether a locally-managed public path resolves to an existing file.
    async fn exists(&self, public_path: &str) -> StorageResult<bool>;

    /// Whether this backend owns the given reference (locally-managed path).
    fn owns(&self, public_path: &str) -> bool;
}
