//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use wayfarer_core::models;

/// Returns the OpenAPI spec.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wayfarer API",
        version = "0.1.0",
        description = "Travel-package booking backend: package CRUD with admin gating, local-disk image uploads for packages, posts, and profiles, and stale-file reclamation on image replacement."
    ),
    paths(
        // Packages
        handlers::packages::get_packages,
        handlers::packages::get_package,
        handlers::packages::create_package,
        handlers::packages::update_package,
        handlers::packages::disable_package,
        handlers::packages::enable_package,
        handlers::packages::get_all_packages_admin,
        // Package images
        handlers::package_images::upload_package_image,
        handlers::package_images::upload_package_images,
        handlers::package_images::upload_temp_image,
        handlers::package_images::upload_temp_images,
        // Posts
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::set_post_image,
        // Users
        handlers::profile::upload_profile_image,
    ),
    components(schemas(
        models::Package,
        models::NewPackage,
        models::PackageUpdate,
        models::Coordinate,
        models::ItineraryDay,
        models::Post,
        models::NewPost,
        models::User,
        models::Role,
        error::ErrorResponse,
        handlers::packages::PackageListResponse,
        handlers::packages::PackageResponse,
        handlers::packages::AdminPackageListResponse,
        handlers::packages::Pagination,
        handlers::package_images::TempImageResponse,
        handlers::package_images::TempImageData,
        handlers::package_images::TempImagesResponse,
        handlers::package_images::TempImagesData,
        handlers::posts::PostResponse,
        handlers::posts::PostListResponse,
        handlers::profile::UserResponse,
    )),
    tags(
        (name = "packages", description = "Tour package CRUD"),
        (name = "package-images", description = "Package image uploads"),
        (name = "posts", description = "Blog posts"),
        (name = "users", description = "Profile images")
    )
)]
struct ApiDoc;
