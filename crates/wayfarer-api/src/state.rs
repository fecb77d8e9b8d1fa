//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`, and to avoid a single god object.

use crate::services::upload::UploadPolicies;
use std::sync::Arc;
use wayfarer_core::Config;
use wayfarer_db::{PackageRepository, PostRepository, UserRepository};
use wayfarer_storage::{StaleFileReclaimer, Storage};

/// Package repository and everything the package handlers need.
#[derive(Clone)]
pub struct PackageState {
    pub repository: PackageRepository,
}

/// Post and user repositories.
#[derive(Clone)]
pub struct ContentState {
    pub posts: PostRepository,
    pub users: UserRepository,
}

/// Storage backend, reclaimer, and per-category upload policies.
#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<dyn Storage>,
    pub reclaimer: StaleFileReclaimer,
    pub policies: UploadPolicies,
}

/// Authentication configuration consumed by the actor extractors.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub packages: PackageState,
    pub content: ContentState,
    pub uploads: UploadState,
    pub auth: AuthConfig,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for PackageState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.packages.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for ContentState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.content.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for AuthConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
