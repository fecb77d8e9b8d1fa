use crate::category::UploadCategory;
use crate::naming::assigned_name;
use crate::traits::{Storage, StorageError, StorageResult, StoredFile};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use wayfarer_core::constants::PUBLIC_UPLOAD_PREFIX;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `root`.
    ///
    /// Category directories are created lazily before the first write, so a
    /// fresh instance performs no filesystem work until a file arrives.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalStorage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a public path (`/uploads/<dir>/<name>`) to a filesystem path.
    ///
    /// Rejects anything outside the managed prefix and anything that could
    /// escape the root via traversal sequences.
    fn public_path_to_fs(&self, public_path: &str) -> StorageResult<PathBuf> {
        let relative = public_path
            .strip_prefix(PUBLIC_UPLOAD_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                StorageError::InvalidPath(format!(
                    "'{}' is not a locally-managed upload path",
                    public_path
                ))
            })?;

        if relative.is_empty()
            || relative.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(StorageError::InvalidPath(format!(
                "'{}' contains invalid path segments",
                public_path
            )));
        }

        Ok(self.root.join(relative))
    }

    /// Ensure the category directory exists. Idempotent; safe under
    /// concurrent first-callers since `create_dir_all` tolerates the
    /// directory already existing.
    async fn ensure_category_dir(&self, category: UploadCategory) -> StorageResult<PathBuf> {
        let dir = self.root.join(category.dir_name());
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(dir)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        category: UploadCategory,
        original_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredFile> {
        let dir = self.ensure_category_dir(category).await?;
        let assigned = assigned_name(original_name);
        let path = dir.join(&assigned);
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let public_path = format!(
            "{}/{}/{}",
            PUBLIC_UPLOAD_PREFIX,
            category.dir_name(),
            assigned
        );

        tracing::info!(
            path = %path.display(),
            public_path = %public_path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(StoredFile {
            category,
            original_name: original_name.to_string(),
            assigned_name: assigned,
            public_path,
            size_bytes: size,
            content_type: content_type.to_string(),
        })
    }

    async fn delete_by_public_path(&self, public_path: &str) -> StorageResult<bool> {
        if !self.owns(public_path) {
            return Ok(false);
        }

        let path = self.public_path_to_fs(public_path)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(false);
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            public_path = %public_path,
            "Local storage delete successful"
        );

        Ok(true)
    }

    async fn exists(&self, public_path: &str) -> StorageResult<bool> {
        let path = self.public_path_to_fs(public_path)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn owns(&self, public_path: &str) -> bool {
        public_path.starts_with(&format!("{}/", PUBLIC_UPLOAD_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_store_writes_file_and_builds_public_path() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let stored = storage
            .store(
                UploadCategory::Package,
                "beach.jpg",
                "image/jpeg",
                b"jpeg bytes".to_vec(),
            )
            .await
            .unwrap();

        assert!(stored.public_path.starts_with("/uploads/packages/beach-"));
        assert_eq!(stored.size_bytes, 10);
        assert!(storage.exists(&stored.public_path).await.unwrap());

        let on_disk = dir.path().join("packages").join(&stored.assigned_name);
        assert_eq!(std::fs::read(on_disk).unwrap(), b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_concurrent_stores_get_distinct_names() {
        let dir = tempdir().unwrap();
        let storage = std::sync::Arc::new(LocalStorage::new(dir.path()));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .store(
                        UploadCategory::Package,
                        "tour.jpg",
                        "image/jpeg",
                        b"x".to_vec(),
                    )
                    .await
                    .unwrap()
                    .assigned_name
            }));
        }

        let mut names = std::collections::HashSet::new();
        for handle in handles {
            names.insert(handle.await.unwrap());
        }
        assert_eq!(names.len(), 20);
    }

    #[tokio::test]
    async fn test_delete_by_public_path_removes_file() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let stored = storage
            .store(UploadCategory::Profile, "me.png", "image/png", b"p".to_vec())
            .await
            .unwrap();

        assert!(storage.delete_by_public_path(&stored.public_path).await.unwrap());
        assert!(!storage.exists(&stored.public_path).await.unwrap());

        // Second delete is a no-op, not an error
        assert!(!storage.delete_by_public_path(&stored.public_path).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_skips_external_urls() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let removed = storage
            .delete_by_public_path("https://example.com/x.jpg")
            .await
            .unwrap();
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let result = storage.exists("/uploads/packages/../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));

        let result = storage.delete_by_public_path("/uploads/../secrets.txt").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[test]
    fn test_owns_distinguishes_local_from_external() {
        let storage = LocalStorage::new("uploads");
        assert!(storage.owns("/uploads/packages/a-123.jpg"));
        assert!(!storage.owns("https://example.com/x.jpg"));
        assert!(!storage.owns("/static/logo.png"));
        assert!(!storage.owns("/uploadsevil/a.jpg"));
    }
}
