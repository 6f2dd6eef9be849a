use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    middleware,
    routing::{get, patch},
    Json, Router,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::dto::{
    AchievementItem, BadgeItem, ChangePasswordRequest, ProfileResponse, StatsResponse,
    UpdateProfileRequest, UpdateStatusRequest,
};
use crate::{
    auth::{extractors::AuthUser, middleware::require_admin},
    dto::MessageResponse,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile/:id", get(get_profile).patch(update_profile))
        .route("/users/:id/password", patch(change_password))
        .route(
            "/users/:id/status",
            patch(update_status).route_layer(middleware::from_fn(require_admin)),
        )
}

pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id/stats", get(get_stats))
        .route("/users/:id/achievements", get(get_achievements))
        .route("/users/:id/badges", get(get_badges))
}

fn ensure_may_act_on(caller: &AuthUser, user_id: Uuid) -> AppResult<()> {
    if !caller.may_act_on(user_id) {
        warn!(caller = %caller.user_id, target = %user_id, "mutation of another account");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<ProfileResponse>> {
    let Path(user_id) = path?;
    let info = state.users.get_profile(user_id).await?;
    Ok(Json(info.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    caller: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(user_id) = path?;
    ensure_may_act_on(&caller, user_id)?;
    let Json(payload) = payload?;
    state.users.update_profile(user_id, payload).await?;
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<StatsResponse>> {
    let Path(user_id) = path?;
    let stats = state.users.stats(user_id).await?;
    Ok(Json(stats.into()))
}

#[instrument(skip(state))]
pub async fn get_achievements(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Vec<AchievementItem>>> {
    let Path(user_id) = path?;
    let items = state.users.achievements(user_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_badges(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Vec<BadgeItem>>> {
    let Path(user_id) = path?;
    let items = state.users.badges(user_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    caller: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(user_id) = path?;
    ensure_may_act_on(&caller, user_id)?;
    let Json(payload) = payload?;
    state.users.change_password(user_id, payload).await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// Admin only; the role gate is attached in [`profile_routes`].
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    caller: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(user_id) = path?;
    let Json(payload) = payload?;
    state
        .users
        .update_status(caller.user_id, user_id, payload)
        .await?;
    Ok(Json(MessageResponse::new("Account status updated")))
}
