use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::roles::Role;

/// Credential columns of a `users` row.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String, // Argon2 PHC string
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub location: String,
}

/// Profile row, one per user.
#[derive(Debug, Clone, FromRow)]
pub struct UserInfo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub location: String,
    pub phone: String,
}

/// Partial update of the account flags; `None` leaves the column untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusUpdate {
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserStats {
    pub id: Uuid,
    pub user_id: Uuid,
    pub courses_completed: i32,
    pub courses_in_progress: i32,
    pub followers: i32,
    pub following: i32,
    pub level: i32,
    pub xp: i32,
    pub next_level_xp: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserAchievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserBadge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub badge_name: String,
}
