use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Flat row produced by the course query; joined columns are NULL when the
/// referenced user, profile or category is missing.
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub title: String,
    pub description: String,
    pub progress: i32,
    pub total_lessons: i32,
    pub completed_lessons: i32,
    pub duration: String,
    pub students_count: i32,
    pub rating: f32,
    pub category_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,

    pub student_email: Option<String>,
    pub student_first_name: Option<String>,
    pub student_last_name: Option<String>,
    pub student_avatar: Option<String>,

    pub tutor_email: Option<String>,
    pub tutor_first_name: Option<String>,
    pub tutor_last_name: Option<String>,
    pub tutor_avatar: Option<String>,

    pub category_name: Option<String>,
    pub category_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseMember {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: Uuid,
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub title: String,
    pub description: String,
    pub progress: i32,
    pub total_lessons: i32,
    pub completed_lessons: i32,
    pub duration: String,
    pub students_count: i32,
    pub rating: f32,
    pub category_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub student: Option<CourseMember>,
    pub tutor: Option<CourseMember>,
    pub category: Option<Category>,
}

fn member(
    id: Uuid,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar: Option<String>,
) -> Option<CourseMember> {
    // email comes from the users join; without it there is no member
    let email = email?;
    Some(CourseMember {
        id,
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        email,
        avatar: avatar.unwrap_or_default(),
    })
}

impl From<CourseRow> for Course {
    fn from(r: CourseRow) -> Self {
        let student = member(
            r.student_id,
            r.student_email,
            r.student_first_name,
            r.student_last_name,
            r.student_avatar,
        );
        let tutor = member(
            r.tutor_id,
            r.tutor_email,
            r.tutor_first_name,
            r.tutor_last_name,
            r.tutor_avatar,
        );
        let category = r.category_name.map(|name| Category {
            id: r.category_id,
            name,
            description: r.category_description.unwrap_or_default(),
        });
        Self {
            id: r.id,
            student_id: r.student_id,
            tutor_id: r.tutor_id,
            title: r.title,
            description: r.description,
            progress: r.progress,
            total_lessons: r.total_lessons,
            completed_lessons: r.completed_lessons,
            duration: r.duration,
            students_count: r.students_count,
            rating: r.rating,
            category_id: r.category_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
            student,
            tutor,
            category,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_row(id: Uuid) -> CourseRow {
    let now = OffsetDateTime::now_utc();
    CourseRow {
        id,
        student_id: Uuid::new_v4(),
        tutor_id: Uuid::new_v4(),
        title: "Algebra I".into(),
        description: "Linear equations and friends".into(),
        progress: 40,
        total_lessons: 10,
        completed_lessons: 4,
        duration: "6 weeks".into(),
        students_count: 12,
        rating: 4.5,
        category_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        student_email: Some("student@example.com".into()),
        student_first_name: Some("Sam".into()),
        student_last_name: Some("Student".into()),
        student_avatar: None,
        tutor_email: None,
        tutor_first_name: None,
        tutor_last_name: None,
        tutor_avatar: None,
        category_name: Some("Math".into()),
        category_description: None,
    }
}
