//! Domain route groups (packages, posts, users).

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;

pub fn package_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/packages",
            get(handlers::packages::get_packages).post(handlers::packages::create_package),
        )
        .route(
            "/api/packages/admin/all",
            get(handlers::packages::get_all_packages_admin),
        )
        .route(
            "/api/packages/temp/image",
            post(handlers::package_images::upload_temp_image),
        )
        .route(
            "/api/packages/temp/images",
            post(handlers::package_images::upload_temp_images),
        )
        .route(
            "/api/packages/{id}",
            get(handlers::packages::get_package).put(handlers::packages::update_package),
        )
        .route(
            "/api/packages/{id}/image",
            put(handlers::package_images::upload_package_image),
        )
        .route(
            "/api/packages/{id}/images",
            put(handlers::package_images::upload_package_images),
        )
        .route(
            "/api/packages/{id}/disable",
            put(handlers::packages::disable_package),
        )
        .route(
            "/api/packages/{id}/enable",
            put(handlers::packages::enable_package),
        )
        .with_state(state)
}

pub fn post_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route("/api/posts/{id}", get(handlers::posts::get_post))
        .route("/api/posts/{id}/image", put(handlers::posts::set_post_image))
        .with_state(state)
}

pub fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/profile-image",
            put(handlers::profile::upload_profile_image),
        )
        .with_state(state)
}
