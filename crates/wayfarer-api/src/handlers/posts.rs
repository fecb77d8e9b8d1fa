//! Post handlers.
//!
//! Post creation takes multipart (`image` file plus `title`/`content` text
//! fields) or plain JSON. The image is optional: a post without one is
//! created as-is.

use crate::auth::{require_admin, Actor};
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::{UploadKind, UploadService};
use crate::state::AppState;
use crate::utils::body::ImageRequest;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;
use wayfarer_core::models::{NewPost, Post};
use wayfarer_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub success: bool,
    pub data: Post,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Post>,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Post not found with id of {}", id))
}

/// Create a post, with or without an image.
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 408, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, multipart), fields(user_id = %actor.user_id, operation = "create_post"))]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    multipart: axum::extract::Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let service = UploadService::new(&state);
    let (stored, payload) = service.upload(UploadKind::PostImage, multipart).await?;

    let new_post = NewPost {
        title: payload.fields.get("title").cloned().unwrap_or_default(),
        content: payload.fields.get("content").cloned().unwrap_or_default(),
        image: stored
            .into_iter()
            .next()
            .map(|file| file.public_path)
            .or_else(|| payload.fields.get("image").cloned()),
    };

    new_post.validate().map_err(AppError::from)?;
    let post = state.content.posts.create(new_post).await?;

    Ok((
        StatusCode::CREATED,
        Json(PostResponse {
            success: true,
            data: post,
        }),
    ))
}

/// List all posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses((status = 200, description = "All posts", body = PostListResponse))
)]
#[tracing::instrument(skip(state), fields(operation = "list_posts"))]
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let posts = state.content.posts.find_all().await?;
    Ok(Json(PostListResponse {
        success: true,
        count: posts.len(),
        data: posts,
    }))
}

/// Fetch a single post.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(post_id = %id, operation = "get_post"))]
pub async fn get_post(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let post = state
        .content
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(PostResponse {
        success: true,
        data: post,
    }))
}

/// Replace the post image, reclaiming the previous local file.
#[utoipa::path(
    put,
    path = "/api/posts/{id}/image",
    tag = "posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image replaced", body = PostResponse),
        (status = 400, description = "No image supplied or file rejected", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 408, description = "Upload timed out", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, actor, request), fields(post_id = %id, user_id = %actor.user_id, operation = "set_post_image"))]
pub async fn set_post_image(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    actor: Actor,
    request: ImageRequest,
) -> Result<impl IntoResponse, HttpAppError> {
    require_admin(&actor)?;

    let image = match request {
        ImageRequest::Files(multipart) => {
            let service = UploadService::new(&state);
            let (stored, payload) = service.upload(UploadKind::PostImage, multipart).await?;
            stored
                .into_iter()
                .next()
                .map(|file| file.public_path)
                .or_else(|| payload.fields.get("image").cloned())
        }
        ImageRequest::Urls(body) => body.image,
    }
    .ok_or_else(|| {
        AppError::InvalidInput("Please upload an image or provide an image URL".to_string())
    })?;

    let post = state
        .content
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    // Reclaim the old local file before persisting the new reference.
    if let Some(ref old) = post.image {
        state.uploads.reclaimer.reclaim(old).await;
    }

    let (updated, _) = state
        .content
        .posts
        .set_image(id, image)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(PostResponse {
        success: true,
        data: updated,
    }))
}
