//! Profile image handler.

use crate::auth::Actor;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::{UploadKind, UploadService};
use crate::state::AppState;
use axum::{extract::Multipart, extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use wayfarer_core::models::User;
use wayfarer_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub data: User,
}

/// Replace the caller's profile image. Unlike the package endpoints the file
/// is mandatory here; there is no URL fallback for profiles.
#[utoipa::path(
    put,
    path = "/api/users/profile-image",
    tag = "users",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Profile image replaced", body = UserResponse),
        (status = 400, description = "No image supplied or file rejected", body = ErrorResponse),
        (status = 408, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, multipart), fields(user_id = %actor.user_id, operation = "upload_profile_image"))]
pub async fn upload_profile_image(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let service = UploadService::new(&state);
    let (stored, _) = service.upload(UploadKind::ProfileImage, multipart).await?;

    let profile_image = stored
        .into_iter()
        .next()
        .map(|file| file.public_path)
        .ok_or_else(|| AppError::InvalidInput("Please upload a profile image".to_string()))?;

    let user = state
        .content
        .users
        .get_or_create(actor.user_id, &actor.email, actor.role)
        .await?;

    // Reclaim the old local file before persisting the new reference.
    if let Some(ref old) = user.profile_image {
        state.uploads.reclaimer.reclaim(old).await;
    }

    let (updated, _) = state
        .content
        .users
        .set_profile_image(actor.user_id, profile_image)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        success: true,
        data: updated,
    }))
}
