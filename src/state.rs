use crate::auth::{
    jwt::{JwtKeys, TokenService},
    password::{Argon2Hasher, PasswordHasher},
    services::AuthService,
};
use crate::config::AppConfig;
use crate::courses::{
    repo::{CourseStore, PgCourseStore},
    services::CourseService,
};
use crate::lessons::{
    repo::{LessonStore, PgLessonStore},
    services::LessonService,
};
use crate::users::{
    repo::{PgUserStore, UserStore},
    services::UserService,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub courses: Arc<CourseService>,
    pub lessons: Arc<LessonService>,
}

impl AppState {
    /// Wires the Postgres stores, JWT keys and Argon2 hasher.
    pub fn new(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        let tokens = Arc::new(JwtKeys::new(&config.jwt)) as Arc<dyn TokenService>;
        let hasher = Arc::new(Argon2Hasher::new(&config.password)?) as Arc<dyn PasswordHasher>;

        Ok(Self::from_parts(
            Arc::new(config),
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgCourseStore::new(db.clone())),
            Arc::new(PgLessonStore::new(db)),
            tokens,
            hasher,
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        courses: Arc<dyn CourseStore>,
        lessons: Arc<dyn LessonStore>,
        tokens: Arc<dyn TokenService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            config,
            auth: Arc::new(AuthService::new(users.clone(), tokens, hasher.clone())),
            users: Arc::new(UserService::new(users.clone(), hasher)),
            courses: Arc::new(CourseService::new(courses)),
            lessons: Arc::new(LessonService::new(lessons, users)),
        }
    }

    /// State over in-memory stores, for router tests.
    #[cfg(test)]
    pub fn fake(
        users: Arc<crate::testing::MemoryUserStore>,
        courses: Arc<crate::testing::MemoryCourseStore>,
        lessons: Arc<crate::testing::MemoryLessonStore>,
    ) -> Self {
        use crate::testing::{test_config, test_hasher, test_keys};

        Self::from_parts(
            Arc::new(test_config()),
            users,
            courses,
            lessons,
            Arc::new(test_keys()),
            Arc::new(test_hasher()),
        )
    }
}
