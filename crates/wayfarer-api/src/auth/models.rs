use crate::error::ErrorResponse;
use crate::state::AuthConfig;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfarer_core::models::Role;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: Uuid, // user_id
    pub email: String,
    pub role: Role,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Authenticated caller extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Caller identity for routes that are public but behave differently for
/// admins (e.g. inactive packages). A missing or invalid token is not an
/// error here; the request simply proceeds anonymously.
#[derive(Debug, Clone, Default)]
pub struct OptionalActor(pub Option<Actor>);

impl OptionalActor {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().map(Actor::is_admin).unwrap_or(false)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

fn decode_actor(token: &str, secret: &str) -> Result<Actor, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<JwtClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
        &jsonwebtoken::Validation::default(),
    )?;
    Ok(Actor {
        user_id: data.claims.sub,
        email: data.claims.email,
        role: data.claims.role,
    })
}

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
            details: None,
            error_type: None,
            code: "UNAUTHORIZED".to_string(),
            recoverable: false,
            suggested_action: Some("Check authentication token".to_string()),
        }),
    )
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
    AuthConfig: FromRef<S>,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthConfig::from_ref(state);
        let token = bearer_token(parts)
            .ok_or_else(|| unauthorized("Not authorized to access this route"))?;

        decode_actor(token, &auth.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            unauthorized("Not authorized to access this route")
        })
    }
}

impl<S> FromRequestParts<S> for OptionalActor
where
    S: Send + Sync,
    AuthConfig: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthConfig::from_ref(state);
        let actor = bearer_token(parts).and_then(|token| {
            decode_actor(token, &auth.jwt_secret)
                .map_err(|e| {
                    tracing::debug!(error = %e, "Ignoring invalid bearer token on public route");
                    e
                })
                .ok()
        });
        Ok(OptionalActor(actor))
    }
}
