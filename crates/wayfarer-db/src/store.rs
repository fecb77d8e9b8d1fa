//! Document store backing the repositories.
//!
//! The store is an in-memory collection of documents with optional JSON-file
//! persistence: when a data file is configured, the dataset is loaded from it
//! at startup and rewritten after every mutation. Durability is therefore
//! exactly one filesystem write deep, matching the system's overall
//! no-transactional-guarantee posture.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use wayfarer_core::models::{Package, Post, User};
use wayfarer_core::AppError;

/// Serializable snapshot of every collection.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DataSet {
    #[serde(default)]
    pub packages: HashMap<Uuid, Package>,
    #[serde(default)]
    pub posts: HashMap<Uuid, Post>,
    #[serde(default)]
    pub users: HashMap<Uuid, User>,
}

/// Shared handle to the dataset. Cheap to clone; all repositories built from
/// the same store see the same documents.
#[derive(Clone)]
pub struct DocumentStore {
    data: Arc<RwLock<DataSet>>,
    data_file: Option<PathBuf>,
}

impl DocumentStore {
    /// Create an empty, purely in-memory store.
    pub fn in_memory() -> Self {
        DocumentStore {
            data: Arc::new(RwLock::new(DataSet::default())),
            data_file: None,
        }
    }

    /// Open a store backed by `data_file`, loading the existing dataset if
    /// the file is present.
    pub async fn open(data_file: PathBuf) -> Result<Self, AppError> {
        let dataset = match tokio::fs::read(&data_file).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Store(format!(
                    "Failed to parse data file {}: {}",
                    data_file.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(data_file = %data_file.display(), "Data file absent, starting empty");
                DataSet::default()
            }
            Err(e) => {
                return Err(AppError::Store(format!(
                    "Failed to read data file {}: {}",
                    data_file.display(),
                    e
                )))
            }
        };

        Ok(DocumentStore {
            data: Arc::new(RwLock::new(dataset)),
            data_file: Some(data_file),
        })
    }

    pub(crate) async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, DataSet> {
        self.data.read().await
    }

    pub(crate) async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, DataSet> {
        self.data.write().await
    }

    /// Rewrite the data file from the current dataset. No-op for in-memory
    /// stores.
    pub(crate) async fn persist(&self) -> Result<(), AppError> {
        let Some(ref path) = self.data_file else {
            return Ok(());
        };

        let snapshot = { self.data.read().await.clone() };
        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| AppError::Store(format!("Failed to serialize dataset: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Store(format!(
                        "Failed to create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        tokio::fs::write(path, json).await.map_err(|e| {
            AppError::Store(format!(
                "Failed to write data file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_core::models::NewPackage;

    fn sample_package() -> Package {
        Package::from_new(NewPackage {
            title: "Desert Safari".to_string(),
            desc: "Two days in the dunes".to_string(),
            start_point: "Karachi".to_string(),
            destinations: vec!["Thar".to_string()],
            duration: "2 days".to_string(),
            price: 12000.0,
            rating: 4.2,
            img: None,
            images: vec![],
            coordinates: vec![],
            itinerary: vec![],
            hostel_type: None,
            transport_type: None,
            meal_plan: None,
            activities: vec![],
            hotel_name: None,
            cdn: None,
            featured: false,
            active: true,
        })
    }

    #[tokio::test]
    async fn open_round_trips_through_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.json");

        let store = DocumentStore::open(file.clone()).await.unwrap();
        let pkg = sample_package();
        let id = pkg.id;
        store.write().await.packages.insert(id, pkg);
        store.persist().await.unwrap();

        let reopened = DocumentStore::open(file).await.unwrap();
        assert!(reopened.read().await.packages.contains_key(&id));
    }

    #[tokio::test]
    async fn open_with_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(store.read().await.packages.is_empty());
    }
}
