use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Course, CourseRow};
use crate::db::StoreResult;

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self, limit: i64, offset: i64) -> StoreResult<Vec<Course>>;
    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>>;
}

#[derive(Clone)]
pub struct PgCourseStore {
    db: PgPool,
}

impl PgCourseStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const COURSE_SELECT: &str = r#"
    SELECT c.id, c.student_id, c.tutor_id, c.title, c.description, c.progress,
           c.total_lessons, c.completed_lessons, c.duration, c.students_count, c.rating,
           c.category_id, c.created_at, c.updated_at,
           su.email       AS student_email,
           si.first_name  AS student_first_name,
           si.last_name   AS student_last_name,
           si.avatar      AS student_avatar,
           tu.email       AS tutor_email,
           ti.first_name  AS tutor_first_name,
           ti.last_name   AS tutor_last_name,
           ti.avatar      AS tutor_avatar,
           cat.name        AS category_name,
           cat.description AS category_description
      FROM courses c
      LEFT JOIN users su      ON su.id = c.student_id
      LEFT JOIN user_info si  ON si.user_id = c.student_id
      LEFT JOIN users tu      ON tu.id = c.tutor_id
      LEFT JOIN user_info ti  ON ti.user_id = c.tutor_id
      LEFT JOIN categories cat ON cat.id = c.category_id
"#;

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn list_courses(&self, limit: i64, offset: i64) -> StoreResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            "{COURSE_SELECT} ORDER BY c.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn find_course(&self, id: Uuid) -> StoreResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!("{COURSE_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(Course::from))
    }
}
