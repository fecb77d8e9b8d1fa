//! Package CRUD and admin gating integration tests.

mod helpers;

use axum::http::StatusCode;
use helpers::{admin_token, package_body, spawn_app, user_token};
use serde_json::Value;

#[tokio::test]
async fn create_package_requires_admin() {
    let app = spawn_app();

    let res = app
        .server
        .post("/api/packages")
        .json(&package_body("Skardu Basecamp"))
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);

    let res = app
        .server
        .post("/api/packages")
        .authorization_bearer(&user_token())
        .json(&package_body("Skardu Basecamp"))
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);

    let res = app
        .server
        .post("/api/packages")
        .authorization_bearer(&admin_token())
        .json(&package_body("Skardu Basecamp"))
        .await;
    assert_eq!(res.status_code(), StatusCode::CREATED);

    let body: Value = res.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Skardu Basecamp");
}

#[tokio::test]
async fn create_package_validates_body() {
    let app = spawn_app();

    let mut body = package_body("x");
    body["title"] = Value::String(String::new());

    let res = app
        .server
        .post("/api/packages")
        .authorization_bearer(&admin_token())
        .json(&body)
        .await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn public_listing_shows_only_active_packages() {
    let app = spawn_app();
    let token = admin_token();

    for title in ["Visible Tour", "Hidden Tour"] {
        let res = app
            .server
            .post("/api/packages")
            .authorization_bearer(&token)
            .json(&package_body(title))
            .await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
    }

    // Disable one of them
    let res = app
        .server
        .get("/api/packages")
        .await;
    let body: Value = res.json();
    let hidden_id = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["title"] == "Hidden Tour")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = app
        .server
        .put(&format!("/api/packages/{}/disable", hidden_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let res = app.server.get("/api/packages").await;
    let body: Value = res.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Visible Tour");
}

#[tokio::test]
async fn inactive_package_is_hidden_from_non_admins() {
    let app = spawn_app();
    let token = admin_token();

    let res = app
        .server
        .post("/api/packages")
        .authorization_bearer(&token)
        .json(&package_body("Secret Retreat"))
        .await;
    let id = res.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

    app.server
        .put(&format!("/api/packages/{}/disable", id))
        .authorization_bearer(&token)
        .await;

    // Anonymous caller: 404
    let res = app.server.get(&format!("/api/packages/{}", id)).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    // Non-admin caller: still 404
    let res = app
        .server
        .get(&format!("/api/packages/{}", id))
        .authorization_bearer(&user_token())
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    // Admin caller sees the record
    let res = app
        .server
        .get(&format!("/api/packages/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>()["data"]["active"], false);
}

#[tokio::test]
async fn featured_filter_narrows_listing() {
    let app = spawn_app();
    let token = admin_token();

    let mut featured = package_body("Featured Tour");
    featured["featured"] = Value::Bool(true);
    app.server
        .post("/api/packages")
        .authorization_bearer(&token)
        .json(&featured)
        .await;
    app.server
        .post("/api/packages")
        .authorization_bearer(&token)
        .json(&package_body("Ordinary Tour"))
        .await;

    let res = app.server.get("/api/packages?featured=true").await;
    let body: Value = res.json();
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Featured Tour");
}

#[tokio::test]
async fn update_package_returns_404_for_unknown_id() {
    let app = spawn_app();

    let res = app
        .server
        .put(&format!("/api/packages/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&admin_token())
        .json(&serde_json::json!({ "price": 1000.0 }))
        .await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_listing_paginates_newest_first() {
    let app = spawn_app();
    let token = admin_token();

    for i in 0..25 {
        let res = app
            .server
            .post("/api/packages")
            .authorization_bearer(&token)
            .json(&package_body(&format!("Tour {}", i)))
            .await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
    }

    let res = app
        .server
        .get("/api/packages/admin/all?page=2&limit=10")
        .authorization_bearer(&token)
        .await;
    assert_eq!(res.status_code(), StatusCode::OK);

    let body: Value = res.json();
    assert_eq!(body["count"], 10);
    assert_eq!(body["total"], 25);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["totalPages"], 3);

    // Non-admins are shut out entirely
    let res = app
        .server
        .get("/api/packages/admin/all")
        .authorization_bearer(&user_token())
        .await;
    assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_check_is_public() {
    let app = spawn_app();
    let res = app.server.get("/health").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.json::<Value>()["status"], "ok");
}
