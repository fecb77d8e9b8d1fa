//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;

use crate::services::upload::UploadPolicies;
use crate::state::{AppState, AuthConfig, ContentState, PackageState, UploadState};
use anyhow::Result;
use std::sync::Arc;
use wayfarer_core::Config;
use wayfarer_db::{DocumentStore, PackageRepository, PostRepository, UserRepository};
use wayfarer_storage::{LocalStorage, StaleFileReclaimer, Storage};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_tracing();
    tracing::info!("Configuration loaded successfully");

    let store = match config.data_file.clone() {
        Some(path) => DocumentStore::open(path).await?,
        None => DocumentStore::in_memory(),
    };

    let storage: Arc<dyn Storage> = Arc::new(LocalStorage::new(config.upload_root.clone()));
    let state = build_state(config.clone(), store, storage);

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Assemble the application state from its collaborators. Split out of
/// [`initialize_app`] so tests can inject their own storage backend.
pub fn build_state(
    config: Config,
    store: DocumentStore,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let is_production = config.is_production();

    Arc::new(AppState {
        packages: PackageState {
            repository: PackageRepository::new(store.clone()),
        },
        content: ContentState {
            posts: PostRepository::new(store.clone()),
            users: UserRepository::new(store),
        },
        uploads: UploadState {
            storage: storage.clone(),
            reclaimer: StaleFileReclaimer::new(storage),
            policies: UploadPolicies::from_config(&config),
        },
        auth: AuthConfig {
            jwt_secret: config.jwt_secret.clone(),
        },
        config,
        is_production,
    })
}
