use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    middleware,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{dto::CreateLessonRequest, repo_types::Lesson};
use crate::{
    auth::middleware::require_admin, dto::MessageResponse, dto::Pagination, error::AppResult,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/lessons", get(list_lessons))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route(
        "/lessons/:creater_id",
        post(create_lesson).route_layer(middleware::from_fn(require_admin)),
    )
}

#[instrument(skip(state))]
pub async fn list_lessons(
    State(state): State<AppState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> AppResult<Json<Vec<Lesson>>> {
    let Query(page) = page?;
    Ok(Json(state.lessons.list_lessons(&page).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_lesson(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CreateLessonRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Path(creator_id) = path?;
    let Json(payload) = payload?;
    state.lessons.create_lesson(creator_id, payload).await?;
    Ok(Json(MessageResponse::new("Lesson created successfully")))
}
