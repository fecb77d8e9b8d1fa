//! Upload pipeline integration tests: storage allocation, validation,
//! stale-file reclamation, and the upload deadline.

mod helpers;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::{admin_token, package_body, spawn_app, spawn_app_with, test_config, user_token};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use wayfarer_storage::{
    LocalStorage, Storage, StorageResult, StoredFile, UploadCategory,
};

fn jpeg_part(bytes: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(bytes).file_name(file_name).mime_type("image/jpeg")
}

fn image_form(bytes: Vec<u8>, file_name: &str) -> MultipartForm {
    MultipartForm::new().add_part("image", jpeg_part(bytes, file_name))
}

/// Number of files currently stored under one category directory.
fn files_in(root: &Path, category: &str) -> usize {
    std::fs::read_dir(root.join(category))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

async fn create_package(app: &helpers::TestApp, token: &str) -> String {
    let res = app
        .server
        .post("/api/packages")
        .authorization_bearer(token)
        .json(&package_body("Upload Target"))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    res.json::<Value>()["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn upload_package_image_stores_file_and_updates_record() {
    let app = spawn_app();
    let token = admin_token();
    let id = create_package(&app, &token).await;

    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .multipart(image_form(b"jpeg bytes".to_vec(), "beach.jpg"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let body: Value = res.json();
    let img = body["data"]["img"].as_str().unwrap();
    assert!(img.starts_with("/uploads/packages/beach-"));
    assert!(img.ends_with(".jpg"));
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 1);
}

#[tokio::test]
async fn replacing_local_image_reclaims_old_file() {
    let app = spawn_app();
    let token = admin_token();
    let id = create_package(&app, &token).await;

    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .multipart(image_form(b"first".to_vec(), "first.jpg"))
        .await;
    let first_img = res.json::<Value>()["data"]["img"].as_str().unwrap().to_string();
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 1);

    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .multipart(image_form(b"second".to_vec(), "second.jpg"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let second_img = res.json::<Value>()["data"]["img"].as_str().unwrap().to_string();

    assert_ne!(first_img, second_img);
    // Old file deleted, only the replacement remains
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 1);
    assert!(!app
        .state
        .uploads
        .storage
        .exists(&first_img)
        .await
        .unwrap());
}

#[tokio::test]
async fn external_url_references_are_never_deleted() {
    let app = spawn_app();
    let token = admin_token();
    let id = create_package(&app, &token).await;

    // Store a local file first
    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .multipart(image_form(b"local".to_vec(), "local.jpg"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 1);

    // Replace with an external URL: the local file is reclaimed
    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "img": "https://example.com/x.jpg" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 0);

    // Replacing the external URL deletes nothing and fails nothing
    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .json(&serde_json::json!({ "img": "https://example.com/y.jpg" }))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>()["data"]["img"],
        "https://example.com/y.jpg"
    );
}

#[tokio::test]
async fn rejected_extension_or_mime_writes_nothing_to_disk() {
    let app = spawn_app();
    let token = admin_token();
    let id = create_package(&app, &token).await;

    // Bad extension, good mime
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"gif".to_vec()).file_name("anim.gif").mime_type("image/gif"),
    );
    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["code"], "UNSUPPORTED_MEDIA_TYPE");

    // Good extension, bad mime
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(b"pdf".to_vec()).file_name("doc.jpg").mime_type("application/pdf"),
    );
    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["code"], "UNSUPPORTED_MEDIA_TYPE");

    assert_eq!(files_in(app.upload_dir.path(), "packages"), 0);
}

#[tokio::test]
async fn profile_size_limit_is_stricter_than_package() {
    let app = spawn_app();
    let token = user_token();
    let six_mb = vec![0u8; 6 * 1024 * 1024];

    // 6 MB profile image: over the 5 MB profile cap
    let form = MultipartForm::new().add_part("profileImage", jpeg_part(six_mb.clone(), "me.jpg"));
    let res = app
        .server
        .put("/api/users/profile-image")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(files_in(app.upload_dir.path(), "profiles"), 0);

    // The same bytes are fine as a package image (10 MB cap)
    let admin = admin_token();
    let id = create_package(&app, &admin).await;
    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&admin)
        .multipart(image_form(six_mb, "big.jpg"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn profile_image_is_mandatory() {
    let app = spawn_app();

    let res = app
        .server
        .put("/api/users/profile-image")
        .authorization_bearer(&user_token())
        .multipart(MultipartForm::new().add_text("note", "no file attached"))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["error"], "Please upload a profile image");
}

#[tokio::test]
async fn gallery_rejects_more_than_ten_files() {
    let app = spawn_app();
    let token = admin_token();
    let id = create_package(&app, &token).await;

    let mut form = MultipartForm::new();
    for i in 0..11 {
        form = form.add_part("images", jpeg_part(b"x".to_vec(), &format!("g{}.jpg", i)));
    }

    let res = app
        .server
        .put(&format!("/api/packages/{}/images", id))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["code"], "TOO_MANY_FILES");
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 0);
}

#[tokio::test]
async fn gallery_replacement_reclaims_every_old_file() {
    let app = spawn_app();
    let token = admin_token();
    let id = create_package(&app, &token).await;

    let mut form = MultipartForm::new();
    for i in 0..3 {
        form = form.add_part("images", jpeg_part(b"old".to_vec(), &format!("old{}.jpg", i)));
    }
    let res = app
        .server
        .put(&format!("/api/packages/{}/images", id))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 3);

    let mut form = MultipartForm::new();
    for i in 0..2 {
        form = form.add_part("images", jpeg_part(b"new".to_vec(), &format!("new{}.jpg", i)));
    }
    let res = app
        .server
        .put(&format!("/api/packages/{}/images", id))
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let body: Value = res.json();
    assert_eq!(body["data"]["images"].as_array().unwrap().len(), 2);
    // All three old files reclaimed, two new files remain
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 2);
}

#[tokio::test]
async fn temp_image_requires_a_file_or_url() {
    let app = spawn_app();
    let token = admin_token();

    let res = app
        .server
        .post("/api/packages/temp/image")
        .authorization_bearer(&token)
        .json(&serde_json::json!({}))
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);

    let res = app
        .server
        .post("/api/packages/temp/image")
        .authorization_bearer(&token)
        .multipart(image_form(b"tmp".to_vec(), "draft.jpg"))
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let body: Value = res.json();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/packages/draft-"));
    assert_eq!(body["data"]["url"], body["url"]);
}

/// Storage wrapper whose writes stall long enough to trip the deadline.
struct SlowStorage {
    inner: LocalStorage,
    delay: Duration,
}

#[async_trait]
impl Storage for SlowStorage {
    async fn store(
        &self,
        category: UploadCategory,
        original_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredFile> {
        tokio::time::sleep(self.delay).await;
        self.inner.store(category, original_name, content_type, data).await
    }

    async fn delete_by_public_path(&self, public_path: &str) -> StorageResult<bool> {
        self.inner.delete_by_public_path(public_path).await
    }

    async fn exists(&self, public_path: &str) -> StorageResult<bool> {
        self.inner.exists(public_path).await
    }

    fn owns(&self, public_path: &str) -> bool {
        self.inner.owns(public_path)
    }
}

#[tokio::test]
async fn stalled_write_times_out_with_408_and_orphan_is_reaped() {
    let upload_dir = tempfile::tempdir().expect("create upload dir");
    let mut config = test_config(upload_dir.path());
    config.single_upload_timeout_secs = 1;

    let storage: Arc<dyn Storage> = Arc::new(SlowStorage {
        inner: LocalStorage::new(upload_dir.path()),
        delay: Duration::from_secs(2),
    });
    let app = spawn_app_with(config, storage, upload_dir);

    let token = admin_token();
    let id = create_package(&app, &token).await;

    let res = app
        .server
        .put(&format!("/api/packages/{}/image", id))
        .authorization_bearer(&token)
        .multipart(image_form(b"slow".to_vec(), "slow.jpg"))
        .await;
    assert_eq!(res.status_code(), StatusCode::REQUEST_TIMEOUT);

    let body: Value = res.json();
    assert_eq!(body["code"], "REQUEST_TIMEOUT");

    // The record keeps its original (empty) reference
    let res = app
        .server
        .get(&format!("/api/packages/{}", id))
        .authorization_bearer(&token)
        .await;
    assert!(res.json::<Value>()["data"]["img"].is_null());

    // The write completes afterwards; the reaper then removes the orphan.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(files_in(app.upload_dir.path(), "packages"), 0);
}
