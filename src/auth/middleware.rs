use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::{extractors::authenticate, extractors::AuthUser, roles::Role};
use crate::{error::AppError, state::AppState};

/// Rejects requests without a valid access token and attaches [`AuthUser`] to the rest.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(req.headers(), &state.auth)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Must run inside [`require_auth`].
pub async fn role_gate(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or(AppError::Unauthorized("User role not found in context"))?;

    if !allowed.contains(&user.role) {
        warn!(user_id = %user.user_id, role = %user.role, "role not permitted");
        return Err(AppError::Forbidden);
    }
    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    role_gate(&[Role::Admin], req, next).await
}
