use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::{UserAchievement, UserBadge, UserInfo, UserStats};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub phone: String,
}

impl From<UserInfo> for ProfileResponse {
    fn from(i: UserInfo) -> Self {
        Self {
            id: i.id,
            user_id: i.user_id,
            first_name: i.first_name,
            last_name: i.last_name,
            avatar: i.avatar,
            bio: i.bio,
            location: i.location,
            phone: i.phone,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub location: String,
    pub phone: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
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

impl From<UserStats> for StatsResponse {
    fn from(s: UserStats) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            courses_completed: s.courses_completed,
            courses_in_progress: s.courses_in_progress,
            followers: s.followers,
            following: s.following,
            level: s.level,
            xp: s.xp,
            next_level_xp: s.next_level_xp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AchievementItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_name: String,
}

impl From<UserAchievement> for AchievementItem {
    fn from(a: UserAchievement) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            achievement_name: a.achievement_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BadgeItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub badge_name: String,
}

impl From<UserBadge> for BadgeItem {
    fn from(b: UserBadge) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            badge_name: b.badge_name,
        }
    }
}
