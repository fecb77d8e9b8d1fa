//! Package image endpoints.
//!
//! Each endpoint accepts either multipart files (stored locally) or JSON URL
//! references (used verbatim). Replacing a reference reclaims the previously
//! stored local file(s) before the new reference is persisted; externally
//! hosted URLs are never touched.

use crate::auth::{require_admin, Actor};
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::packages::PackageResponse;
use crate::services::upload::{UploadKind, UploadService};
use crate::state::AppState;
use crate::utils::body::ImageRequest;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use wayfarer_core::models::PackageUpdate;
use wayfarer_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct TempImageData {
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TempImageResponse {
    pub success: bool,
    pub url: String,
    pub data: TempImageData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TempImagesData {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TempImagesResponse {
    pub success: bool,
    pub urls: Vec<String>,
    pub data: TempImagesData,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Package not found with id of {}", id))
}

/// Resolve the single-image reference from either upload or URL body.
async fn resolve_single(
    state: &Arc<AppState>,
    kind: UploadKind,
    request: ImageRequest,
    url_field: fn(crate::utils::body::ImageUrlBody) -> Option<String>,
) -> Result<Option<String>, HttpAppError> {
    match request {
        ImageRequest::Files(multipart) => {
            let service = UploadService::new(state);
            let (stored, payload) = service.upload(kind, multipart).await?;
            Ok(stored
                .into_iter()
                .next()
                .map(|file| file.public_path)
                // A plain form field may carry the URL instead of a file part.
                .or_else(|| payload.fields.get("img").cloned()))
        }
        ImageRequest::Urls(body) => Ok(url_field(body)),
    }
}

/// Set the main package image.
#[utoipa::path(
    put,
    path = "/api/packages/{id}/image",
    tag = "package-images",
    params(("id" = Uuid, Path, description = "Package ID")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image replaced", body = PackageResponse),
        (status = 400, description = "No image supplied or file rejected", body = ErrorResponse),
        (status = 404, description = "Package not found", body = ErrorResponse),
        (status = 408, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, request), fields(package_id = %id, user_id = %actor.user_id, operation = "upload_package_image"))]
pub async fn upload_package_image(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    actor: Actor,
    request: ImageRequest,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let img = resolve_single(&state, UploadKind::PackageImage, request, |body| body.img)
        .await?
        .ok_or_else(|| {
            AppError::InvalidInput("Please upload an image or provide an image URL".to_string())
        })?;

    let package = state
        .packages
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    // Reclaim the old local file before persisting the new reference.
    if let Some(ref old) = package.img {
        state.uploads.reclaimer.reclaim(old).await;
    }

    let updated = state
        .packages
        .repository
        .update(
            id,
            PackageUpdate {
                img: Some(img),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(PackageResponse {
        success: true,
        data: updated,
    }))
}

/// Replace the package gallery (up to the configured image count).
#[utoipa::path(
    put,
    path = "/api/packages/{id}/images",
    tag = "package-images",
    params(("id" = Uuid, Path, description = "Package ID")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Gallery replaced", body = PackageResponse),
        (status = 400, description = "No images supplied or a file was rejected", body = ErrorResponse),
        (status = 404, description = "Package not found", body = ErrorResponse),
        (status = 408, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, request), fields(package_id = %id, user_id = %actor.user_id, operation = "upload_package_images"))]
pub async fn upload_package_images(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    actor: Actor,
    request: ImageRequest,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let images: Vec<String> = match request {
        ImageRequest::Files(multipart) => {
            let service = UploadService::new(&state);
            let (stored, _) = service.upload(UploadKind::PackageGallery, multipart).await?;
            stored.into_iter().map(|file| file.public_path).collect()
        }
        ImageRequest::Urls(body) => body.images.unwrap_or_default(),
    };

    if images.is_empty() {
        return Err(AppError::InvalidInput(
            "Please upload at least one image or provide image URLs".to_string(),
        )
        .into());
    }

    let package = state
        .packages
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    state.uploads.reclaimer.reclaim_all(&package.images).await;

    let updated = state
        .packages
        .repository
        .update(
            id,
            PackageUpdate {
                images: Some(images),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(PackageResponse {
        success: true,
        data: updated,
    }))
}

/// Store an image before its package exists (draft creation flow).
#[utoipa::path(
    post,
    path = "/api/packages/temp/image",
    tag = "package-images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = TempImageResponse),
        (status = 400, description = "No image supplied or file rejected", body = ErrorResponse),
        (status = 408, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, request), fields(user_id = %actor.user_id, operation = "upload_temp_image"))]
pub async fn upload_temp_image(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    request: ImageRequest,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let url = resolve_single(&state, UploadKind::PackageImage, request, |body| body.img)
        .await?
        .ok_or_else(|| AppError::InvalidInput("Please upload an image".to_string()))?;

    Ok(Json(TempImageResponse {
        success: true,
        url: url.clone(),
        data: TempImageData { url },
    }))
}

/// Store a set of images before their package exists.
#[utoipa::path(
    post,
    path = "/api/packages/temp/images",
    tag = "package-images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Images stored", body = TempImagesResponse),
        (status = 400, description = "No images supplied or a file was rejected", body = ErrorResponse),
        (status = 408, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, request), fields(user_id = %actor.user_id, operation = "upload_temp_images"))]
pub async fn upload_temp_images(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    request: ImageRequest,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let urls: Vec<String> = match request {
        ImageRequest::Files(multipart) => {
            let service = UploadService::new(&state);
            let (stored, _) = service.upload(UploadKind::PackageGallery, multipart).await?;
            stored.into_iter().map(|file| file.public_path).collect()
        }
        ImageRequest::Urls(body) => body.images.unwrap_or_default(),
    };

    if urls.is_empty() {
        return Err(AppError::InvalidInput("Please upload at least one image".to_string()).into());
    }

    Ok(Json(TempImagesResponse {
        success: true,
        urls: urls.clone(),
        data: TempImagesData { urls },
    }))
}
