//! Package CRUD handlers.

use crate::auth::{require_admin, Actor, OptionalActor};
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use wayfarer_core::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use wayfarer_core::models::{NewPackage, Package, PackageUpdate};
use wayfarer_core::AppError;
use wayfarer_db::PackageFilter;

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Package>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageResponse {
    pub success: bool,
    pub data: Package,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminPackageListResponse {
    pub success: bool,
    pub count: usize,
    pub total: u64,
    pub pagination: Pagination,
    pub data: Vec<Package>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub featured: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Package not found with id of {}", id))
}

/// List active packages, optionally only featured ones.
#[utoipa::path(
    get,
    path = "/api/packages",
    tag = "packages",
    params(
        ("featured" = Option<String>, Query, description = "Pass 'true' to list featured packages only")
    ),
    responses(
        (status = 200, description = "Active packages", body = PackageListResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_packages"))]
pub async fn get_packages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let filter = PackageFilter {
        active: Some(true),
        featured: (query.featured.as_deref() == Some("true")).then_some(true),
    };

    let packages = state.packages.repository.find(filter).await?;

    Ok(Json(PackageListResponse {
        success: true,
        count: packages.len(),
        data: packages,
    }))
}

/// Fetch a single package. Inactive packages exist only for admins;
/// everyone else gets the same 404 an unknown id would produce.
#[utoipa::path(
    get,
    path = "/api/packages/{id}",
    tag = "packages",
    params(("id" = Uuid, Path, description = "Package ID")),
    responses(
        (status = 200, description = "Package found", body = PackageResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor), fields(package_id = %id, operation = "get_package"))]
pub async fn get_package(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    actor: OptionalActor,
) -> Result<impl IntoResponse, HttpAppError> {
    let package = state
        .packages
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !package.active && !actor.is_admin() {
        return Err(not_found(id).into());
    }

    Ok(Json(PackageResponse {
        success: true,
        data: package,
    }))
}

/// Create a new package.
#[utoipa::path(
    post,
    path = "/api/packages",
    tag = "packages",
    request_body = NewPackage,
    responses(
        (status = 201, description = "Package created", body = PackageResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not an admin", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, body), fields(user_id = %actor.user_id, operation = "create_package"))]
pub async fn create_package(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    ValidatedJson(body): ValidatedJson<NewPackage>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let package = state.packages.repository.create(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(PackageResponse {
            success: true,
            data: package,
        }),
    ))
}

/// Update package fields.
#[utoipa::path(
    put,
    path = "/api/packages/{id}",
    tag = "packages",
    params(("id" = Uuid, Path, description = "Package ID")),
    request_body = PackageUpdate,
    responses(
        (status = 200, description = "Package updated", body = PackageResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, body), fields(package_id = %id, user_id = %actor.user_id, operation = "update_package"))]
pub async fn update_package(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    actor: Actor,
    ValidatedJson(body): ValidatedJson<PackageUpdate>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let package = state
        .packages
        .repository
        .update(id, body)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(PackageResponse {
        success: true,
        data: package,
    }))
}

/// Soft-delete: flip `active` off so the package disappears from public
/// listings without losing the record.
#[utoipa::path(
    put,
    path = "/api/packages/{id}/disable",
    tag = "packages",
    params(("id" = Uuid, Path, description = "Package ID")),
    responses(
        (status = 200, description = "Package disabled", body = PackageResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor), fields(package_id = %id, user_id = %actor.user_id, operation = "disable_package"))]
pub async fn disable_package(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    actor: Actor,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;
    set_active(&state, id, false).await
}

/// Restore a disabled package.
#[utoipa::path(
    put,
    path = "/api/packages/{id}/enable",
    tag = "packages",
    params(("id" = Uuid, Path, description = "Package ID")),
    responses(
        (status = 200, description = "Package enabled", body = PackageResponse),
        (status = 404, description = "Package not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor), fields(package_id = %id, user_id = %actor.user_id, operation = "enable_package"))]
pub async fn enable_package(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    actor: Actor,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;
    set_active(&state, id, true).await
}

async fn set_active(
    state: &Arc<AppState>,
    id: Uuid,
    active: bool,
) -> Result<axum::response::Response, HttpAppError> {
    let package = state
        .packages
        .repository
        .update(
            id,
            PackageUpdate {
                active: Some(active),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(PackageResponse {
        success: true,
        data: package,
    })
    .into_response())
}

/// All packages including inactive ones, paginated, newest first.
#[utoipa::path(
    get,
    path = "/api/packages/admin/all",
    tag = "packages",
    params(
        ("page" = Option<u64>, Query, description = "1-based page number"),
        ("limit" = Option<u64>, Query, description = "Page size, max 100")
    ),
    responses(
        (status = 200, description = "Paginated packages", body = AdminPackageListResponse),
        (status = 401, description = "Not an admin", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, query), fields(user_id = %actor.user_id, operation = "get_all_packages_admin"))]
pub async fn get_all_packages_admin(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT);

    let total = state
        .packages
        .repository
        .count(PackageFilter::default())
        .await?;
    let packages = state.packages.repository.find_page(page, limit).await?;

    Ok(Json(AdminPackageListResponse {
        success: true,
        count: packages.len(),
        total,
        pagination: Pagination {
            page,
            limit,
            total_pages: total.div_ceil(limit),
        },
        data: packages,
    }))
}
