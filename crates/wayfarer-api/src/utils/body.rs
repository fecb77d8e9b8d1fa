//! Request body extraction for the image endpoints.
//!
//! Image endpoints accept either multipart form data (files to store locally)
//! or a JSON body carrying externally-hosted URL(s). In the URL case the
//! storage allocator is bypassed entirely and the reference is used verbatim.

use crate::error::HttpAppError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::Deserialize;
use wayfarer_core::AppError;

/// URL references supplied directly in a JSON body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlBody {
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub image: Option<String>,
}

/// An image mutation request: files to upload, or URLs to reference.
pub enum ImageRequest {
    Files(Multipart),
    Urls(ImageUrlBody),
}

impl<S> FromRequest<S> for ImageRequest
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase());

        match content_type {
            Some(ct) if ct.starts_with("multipart/form-data") => {
                Multipart::from_request(req, state)
                    .await
                    .map(ImageRequest::Files)
                    .map_err(|e| {
                        HttpAppError(AppError::InvalidInput(format!(
                            "Failed to read multipart: {}",
                            e
                        )))
                    })
            }
            Some(ct) if ct.starts_with("application/json") => {
                let Json(body) = Json::<ImageUrlBody>::from_request(req, state)
                    .await
                    .map_err(HttpAppError::from)?;
                Ok(ImageRequest::Urls(body))
            }
            // No body at all: treated as "no image supplied"; the handler
            // decides whether that is an error.
            _ => Ok(ImageRequest::Urls(ImageUrlBody::default())),
        }
    }
}
