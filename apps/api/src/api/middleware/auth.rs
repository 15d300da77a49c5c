use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::user::Role;

/// JWT authentication extractor
///
/// Verifies the `Bearer` token with the configured [`TokenIssuer`] and yields
/// the role it was issued for. Any token problem is a 401.
///
/// [`TokenIssuer`]: crate::auth::jwt::TokenIssuer
pub struct JwtAuth(pub Role);

#[async_trait]
impl FromRequestParts<AppState> for JwtAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
        })?;

        let claims = state
            .tokens
            .verify(token)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(JwtAuth(claims.role))
    }
}

/// Set of roles admitted by a route
pub trait AllowedRoles: Send + Sync {
    const ROLES: &'static [Role];
}

pub struct ModeratorOnly;

impl AllowedRoles for ModeratorOnly {
    const ROLES: &'static [Role] = &[Role::Moderator];
}

pub struct EmployeeOnly;

impl AllowedRoles for EmployeeOnly {
    const ROLES: &'static [Role] = &[Role::Employee];
}

pub struct AnyStaff;

impl AllowedRoles for AnyStaff {
    const ROLES: &'static [Role] = &[Role::Moderator, Role::Employee];
}

/// Authenticated caller whose role is in `R`
///
/// Rejects with 401 when the token is missing or invalid and with 403 when
/// the role is not admitted. Runs before the body is read.
pub struct Authorized<R: AllowedRoles>(pub Role, PhantomData<R>);

#[async_trait]
impl<R: AllowedRoles> FromRequestParts<AppState> for Authorized<R> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let JwtAuth(role) = JwtAuth::from_request_parts(parts, state).await?;

        if !R::ROLES.contains(&role) {
            tracing::debug!(%role, "role not allowed for route");
            return Err(ApiError::forbidden("Forbidden"));
        }

        Ok(Authorized(role, PhantomData))
    }
}
