use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateLessonRequest {
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub duration: String,
}
