use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tracing::warn;
use uuid::Uuid;

use super::{roles::Role, services::AuthService};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// Identity of the caller, taken from a validated access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The caller may act on `user_id` when it is their own account or they are an admin.
    pub fn may_act_on(&self, user_id: Uuid) -> bool {
        self.user_id == user_id || self.is_admin()
    }
}

/// Reads `Authorization: Bearer <token>` and validates the token.
pub(crate) fn authenticate(headers: &HeaderMap, auth: &AuthService) -> AppResult<AuthUser> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized("Authorization header required"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized("Invalid authorization header format"))?;

    let (user_id, role) = auth.validate_token(token).map_err(|_| {
        warn!("invalid or expired token");
        AppError::Unauthorized("Invalid token")
    })?;

    Ok(AuthUser { user_id, role })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // already attached by the auth middleware
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }
        let user = authenticate(&parts.headers, &state.auth)?;
        parts.extensions.insert(user);
        Ok(user)
    }
}
