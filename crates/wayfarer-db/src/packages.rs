use crate::store::DocumentStore;
use uuid::Uuid;
use validator::Validate;
use wayfarer_core::models::{NewPackage, Package, PackageUpdate};
use wayfarer_core::AppError;

/// Filter for package queries, mirroring the document-store find contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageFilter {
    pub active: Option<bool>,
    pub featured: Option<bool>,
}

impl PackageFilter {
    fn matches(&self, pkg: &Package) -> bool {
        if let Some(active) = self.active {
            if pkg.active != active {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if pkg.featured != featured {
                return false;
            }
        }
        true
    }
}

/// Repository for tour packages
#[derive(Clone)]
pub struct PackageRepository {
    store: DocumentStore,
}

impl PackageRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self), fields(db.collection = "packages", db.operation = "find_by_id"))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Package>, AppError> {
        Ok(self.store.read().await.packages.get(&id).cloned())
    }

    /// Find packages matching the filter, newest first.
    #[tracing::instrument(skip(self), fields(db.collection = "packages", db.operation = "find"))]
    pub async fn find(&self, filter: PackageFilter) -> Result<Vec<Package>, AppError> {
        let data = self.store.read().await;
        let mut matches: Vec<Package> = data
            .packages
            .values()
            .filter(|pkg| filter.matches(pkg))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    /// One page of all packages (including inactive), newest first.
    /// `page` is 1-based.
    #[tracing::instrument(skip(self), fields(db.collection = "packages", db.operation = "find_page"))]
    pub async fn find_page(&self, page: u64, limit: u64) -> Result<Vec<Package>, AppError> {
        let all = self.find(PackageFilter::default()).await?;
        let skip = (page.saturating_sub(1) * limit) as usize;
        Ok(all.into_iter().skip(skip).take(limit as usize).collect())
    }

    #[tracing::instrument(skip(self), fields(db.collection = "packages", db.operation = "count"))]
    pub async fn count(&self, filter: PackageFilter) -> Result<u64, AppError> {
        let data = self.store.read().await;
        Ok(data.packages.values().filter(|pkg| filter.matches(pkg)).count() as u64)
    }

    /// Find a package by exact title. Used by the seed tool for upserts.
    #[tracing::instrument(skip(self), fields(db.collection = "packages", db.operation = "find_by_title"))]
    pub async fn find_by_title(&self, title: &str) -> Result<Option<Package>, AppError> {
        let data = self.store.read().await;
        Ok(data.packages.values().find(|pkg| pkg.title == title).cloned())
    }

    #[tracing::instrument(skip(self, new), fields(db.collection = "packages", db.operation = "create"))]
    pub async fn create(&self, new: NewPackage) -> Result<Package, AppError> {
        new.validate()?;
        let pkg = Package::from_new(new);
        self.store.write().await.packages.insert(pkg.id, pkg.clone());
        self.store.persist().await?;
        Ok(pkg)
    }

    /// Apply a partial update and return the updated document, or `None`
    /// when the id is unknown. The update is validated before it is applied.
    #[tracing::instrument(skip(self, update), fields(db.collection = "packages", db.operation = "update", db.record_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        update: PackageUpdate,
    ) -> Result<Option<Package>, AppError> {
        update.validate()?;
        let updated = {
            let mut data = self.store.write().await;
            match data.packages.get_mut(&id) {
                Some(pkg) => {
                    pkg.apply(update);
                    Some(pkg.clone())
                }
                None => None,
            }
        };
        if updated.is_some() {
            self.store.persist().await?;
        }
        Ok(updated)
    }
}
