//! Shared fixtures for integration tests.

use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;
use wayfarer_api::auth::issue_token;
use wayfarer_api::setup::{build_state, routes::setup_routes};
use wayfarer_api::state::AppState;
use wayfarer_core::models::Role;
use wayfarer_core::Config;
use wayfarer_db::DocumentStore;
use wayfarer_storage::{LocalStorage, Storage};

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    // Held so the upload root outlives the test
    #[allow(dead_code)]
    pub upload_dir: tempfile::TempDir,
}

pub fn test_config(upload_root: &Path) -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiry_hours: 1,
        upload_root: upload_root.to_path_buf(),
        data_file: None,
        package_max_file_size_bytes: 10 * 1024 * 1024,
        profile_max_file_size_bytes: 5 * 1024 * 1024,
        post_max_file_size_bytes: 10 * 1024 * 1024,
        max_gallery_images: 10,
        allowed_image_extensions: vec![
            "jpeg".to_string(),
            "jpg".to_string(),
            "png".to_string(),
            "webp".to_string(),
        ],
        allowed_image_mime_prefixes: vec!["image/".to_string()],
        single_upload_timeout_secs: 20,
        multi_upload_timeout_secs: 30,
    }
}

pub fn spawn_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("create upload dir");
    let config = test_config(upload_dir.path());
    let storage: Arc<dyn Storage> = Arc::new(LocalStorage::new(upload_dir.path()));
    spawn_app_with(config, storage, upload_dir)
}

/// Build the app with a caller-supplied config and storage backend.
pub fn spawn_app_with(
    config: Config,
    storage: Arc<dyn Storage>,
    upload_dir: tempfile::TempDir,
) -> TestApp {
    let state = build_state(config.clone(), DocumentStore::in_memory(), storage);
    let router = setup_routes(&config, state.clone()).expect("build router");
    TestApp {
        server: TestServer::new(router).expect("start test server"),
        state,
        upload_dir,
    }
}

pub fn admin_token() -> String {
    issue_token(
        JWT_SECRET,
        Uuid::new_v4(),
        "admin@example.com",
        Role::Admin,
        1,
    )
    .expect("issue admin token")
}

pub fn user_token() -> String {
    issue_token(JWT_SECRET, Uuid::new_v4(), "user@example.com", Role::User, 1)
        .expect("issue user token")
}

/// Minimal valid package creation body.
pub fn package_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "desc": "A relaxing getaway",
        "startPoint": "Lahore",
        "destinations": ["Hunza"],
        "duration": "3 days",
        "price": 20000.0,
        "rating": 4.4
    })
}
