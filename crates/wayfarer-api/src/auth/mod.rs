//! Authentication and authorization.
//!
//! The auth provider itself is external; this module only decodes the bearer
//! tokens it issues and gates privileged mutations on the admin role.

pub mod models;

pub use models::{Actor, JwtClaims, OptionalActor};

use chrono::{Duration, Utc};
use uuid::Uuid;
use wayfarer_core::models::Role;
use wayfarer_core::AppError;

/// Reject non-admin callers of privileged mutations.
pub fn require_admin(actor: &Actor) -> Result<(), AppError> {
    if !actor.is_admin() {
        return Err(AppError::Unauthorized(
            "Not authorized to access this route".to_string(),
        ));
    }
    Ok(())
}

/// Issue an HS256 bearer token. Used by operational tooling and tests; the
/// production issuer lives in the external auth service.
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    email: &str,
    role: Role,
    expiry_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id,
        email: email.to_string(),
        role,
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))
}
