use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::claims::{Claims, TokenKind};
use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Extracts and validates an access token, returning the user ID.
pub struct AuthUser(pub Uuid);

/// Like [`AuthUser`] but also requires the admin role claim.
pub struct AdminUser(pub Uuid);

fn access_claims(parts: &Parts, keys: &JwtKeys) -> Result<Claims, ApiError> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header".into()))?;

    let claims = keys.verify(token).map_err(|_| {
        warn!("invalid or expired token");
        ApiError::Unauthorized("Invalid or expired token".into())
    })?;

    if claims.kind != TokenKind::Access {
        return Err(ApiError::Unauthorized("Access token required".into()));
    }
    Ok(claims)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let claims = access_claims(parts, &keys)?;
        Ok(AuthUser(claims.sub))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let claims = access_claims(parts, &keys)?;
        if !claims.admin {
            warn!(user_id = %claims.sub, "admin route denied");
            return Err(ApiError::Forbidden("Admin access required".into()));
        }
        Ok(AdminUser(claims.sub))
    }
}
