use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{dto::CreateLessonRequest, repo::LessonStore, repo_types::Lesson};
use crate::{
    auth::roles::Role,
    db::db_failure,
    dto::Pagination,
    error::{AppError, AppResult},
    users::repo::UserStore,
};

pub struct LessonService {
    lessons: Arc<dyn LessonStore>,
    users: Arc<dyn UserStore>,
}

impl LessonService {
    pub fn new(lessons: Arc<dyn LessonStore>, users: Arc<dyn UserStore>) -> Self {
        Self { lessons, users }
    }

    pub async fn list_lessons(&self, page: &Pagination) -> AppResult<Vec<Lesson>> {
        let (limit, offset) = page.clamped();
        self.lessons
            .list_lessons(limit, offset)
            .await
            .map_err(db_failure("list_lessons"))
    }

    /// Stores a lesson on behalf of `creator_id`, who must be an admin.
    #[instrument(skip(self, req))]
    pub async fn create_lesson(
        &self,
        creator_id: Uuid,
        req: CreateLessonRequest,
    ) -> AppResult<Lesson> {
        let creator = self
            .users
            .find_by_id(creator_id)
            .await
            .map_err(db_failure("find_by_id"))?
            .ok_or(AppError::NotFound)?;
        if creator.role != Role::Admin {
            warn!(creator_id = %creator_id, role = %creator.role, "lesson creator is not an admin");
            return Err(AppError::Forbidden);
        }

        let title = req.title.trim();
        let video_url = req.video_url.trim();
        let duration = req.duration.trim();
        if req.course_id.is_nil() || title.is_empty() || video_url.is_empty() || duration.is_empty()
        {
            return Err(AppError::MissingFields);
        }

        let now = OffsetDateTime::now_utc();
        let lesson = Lesson {
            id: Uuid::new_v4(),
            course_id: req.course_id,
            title: title.to_string(),
            description: req.description,
            video_url: video_url.to_string(),
            duration: duration.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.lessons
            .create_lesson(&lesson)
            .await
            .map_err(db_failure("create_lesson"))?;
        info!(lesson_id = %lesson.id, course_id = %lesson.course_id, "lesson created");
        Ok(lesson)
    }
}
