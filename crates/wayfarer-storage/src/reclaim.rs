//! Stale-file reclamation.
//!
//! When a record's image reference is replaced, the previously referenced
//! local files become unreachable and are deleted here. Reclamation is
//! best-effort cleanup, not part of the transactional guarantee of the
//! update: every failure is logged and swallowed so the primary mutation is
//! never blocked.

use crate::traits::Storage;
use std::sync::Arc;

/// Deletes files previously referenced by a record about to be overwritten.
#[derive(Clone)]
pub struct StaleFileReclaimer {
    storage: Arc<dyn Storage>,
}

impl StaleFileReclaimer {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        StaleFileReclaimer { storage }
    }

    /// Reclaim a single replaced reference. Externally-hosted URLs are
    /// skipped unconditionally: this system does not own their bytes.
    pub async fn reclaim(&self, public_path: &str) {
        if !self.storage.owns(public_path) {
            tracing::debug!(reference = %public_path, "Skipping reclamation of external reference");
            return;
        }

        match self.storage.delete_by_public_path(public_path).await {
            Ok(true) => {
                tracing::info!(public_path = %public_path, "Reclaimed stale upload");
            }
            Ok(false) => {
                tracing::debug!(public_path = %public_path, "Stale upload already gone");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    public_path = %public_path,
                    "Failed to reclaim stale upload"
                );
            }
        }
    }

    /// Reclaim every replaced reference in order. A gallery replace may
    /// touch up to the category's file-count limit.
    pub async fn reclaim_all<S: AsRef<str>>(&self, public_paths: &[S]) {
        for path in public_paths {
            self.reclaim(path.as_ref()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::UploadCategory;
    use crate::local::LocalStorage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reclaim_deletes_local_file() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let reclaimer = StaleFileReclaimer::new(storage.clone());

        let stored = storage
            .store(UploadCategory::Package, "old.jpg", "image/jpeg", b"o".to_vec())
            .await
            .unwrap();
        assert!(storage.exists(&stored.public_path).await.unwrap());

        reclaimer.reclaim(&stored.public_path).await;
        assert!(!storage.exists(&stored.public_path).await.unwrap());
    }

    #[tokio::test]
    async fn test_reclaim_ignores_external_urls() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let reclaimer = StaleFileReclaimer::new(storage);

        // Must not error, must not touch anything
        reclaimer.reclaim("https://example.com/x.jpg").await;
    }

    #[tokio::test]
    async fn test_reclaim_swallows_missing_files() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let reclaimer = StaleFileReclaimer::new(storage);

        reclaimer.reclaim("/uploads/packages/never-existed.jpg").await;
        // Traversal attempts resolve to an error inside delete; swallowed too.
        reclaimer.reclaim("/uploads/../evil.jpg").await;
    }

    #[tokio::test]
    async fn test_reclaim_all_handles_mixed_references() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let reclaimer = StaleFileReclaimer::new(storage.clone());

        let a = storage
            .store(UploadCategory::Package, "a.jpg", "image/jpeg", b"a".to_vec())
            .await
            .unwrap();
        let b = storage
            .store(UploadCategory::Package, "b.jpg", "image/jpeg", b"b".to_vec())
            .await
            .unwrap();

        let refs = vec![
            a.public_path.clone(),
            "https://example.com/keep.jpg".to_string(),
            b.public_path.clone(),
        ];
        reclaimer.reclaim_all(&refs).await;

        assert!(!storage.exists(&a.public_path).await.unwrap());
        assert!(!storage.exists(&b.public_path).await.unwrap());
    }
}
