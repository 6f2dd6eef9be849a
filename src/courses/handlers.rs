use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::repo_types::Course;
use crate::{dto::Pagination, error::AppResult, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:id", get(get_course))
}

#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> AppResult<Json<Vec<Course>>> {
    let Query(page) = page?;
    Ok(Json(state.courses.list_courses(&page).await?))
}

#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Course>> {
    let Path(id) = path?;
    Ok(Json(state.courses.get_course(id).await?))
}
