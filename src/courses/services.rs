use std::sync::Arc;

use uuid::Uuid;

use super::{repo::CourseStore, repo_types::Course};
use crate::{
    db::db_failure,
    dto::Pagination,
    error::{AppError, AppResult},
};

pub struct CourseService {
    courses: Arc<dyn CourseStore>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseStore>) -> Self {
        Self { courses }
    }

    pub async fn list_courses(&self, page: &Pagination) -> AppResult<Vec<Course>> {
        let (limit, offset) = page.clamped();
        self.courses
            .list_courses(limit, offset)
            .await
            .map_err(db_failure("list_courses"))
    }

    pub async fn get_course(&self, id: Uuid) -> AppResult<Course> {
        self.courses
            .find_course(id)
            .await
            .map_err(db_failure("find_course"))?
            .ok_or(AppError::NotFound)
    }
}
