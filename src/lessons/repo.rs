use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::Lesson;
use crate::db::StoreResult;

#[async_trait]
pub trait LessonStore: Send + Sync {
    async fn list_lessons(&self, limit: i64, offset: i64) -> StoreResult<Vec<Lesson>>;
    async fn create_lesson(&self, lesson: &Lesson) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct PgLessonStore {
    db: PgPool,
}

impl PgLessonStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LessonStore for PgLessonStore {
    async fn list_lessons(&self, limit: i64, offset: i64) -> StoreResult<Vec<Lesson>> {
        let rows = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, course_id, title, description, video_url, duration, created_at, updated_at
              FROM lessons
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn create_lesson(&self, lesson: &Lesson) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lessons (id, course_id, title, description, video_url, duration,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(lesson.id)
        .bind(lesson.course_id)
        .bind(&lesson.title)
        .bind(&lesson.description)
        .bind(&lesson.video_url)
        .bind(&lesson.duration)
        .bind(lesson.created_at)
        .bind(lesson.updated_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
