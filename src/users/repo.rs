use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{
    NewUser, ProfileUpdate, StatusUpdate, User, UserAchievement, UserBadge, UserInfo, UserStats,
};
use crate::db::StoreResult;

/// Persistence for accounts and their satellite records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
    async fn create_user(&self, user: &NewUser) -> StoreResult<User>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool>;
    async fn update_status(&self, id: Uuid, status: StatusUpdate) -> StoreResult<bool>;

    async fn find_user_info(&self, user_id: Uuid) -> StoreResult<Option<UserInfo>>;
    async fn create_user_info(&self, info: &UserInfo) -> StoreResult<()>;
    /// Returns `false` when the user has no profile row.
    async fn update_user_info(&self, user_id: Uuid, update: &ProfileUpdate) -> StoreResult<bool>;

    async fn find_stats(&self, user_id: Uuid) -> StoreResult<Option<UserStats>>;
    async fn list_achievements(&self, user_id: Uuid) -> StoreResult<Vec<UserAchievement>>;
    async fn list_badges(&self, user_id: Uuid) -> StoreResult<Vec<UserBadge>>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, role";

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(&self.db)
                .await?;
        Ok(exists)
    }

    async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
        let created = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, role, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.location)
        .fetch_one(&self.db)
        .await?;
        Ok(created)
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> StoreResult<bool> {
        let res = sqlx::query(
            r#"UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1"#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn update_status(&self, id: Uuid, status: StatusUpdate) -> StoreResult<bool> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET is_active   = COALESCE($2, is_active),
                   is_verified = COALESCE($3, is_verified),
                   updated_at  = now()
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.is_active)
        .bind(status.is_verified)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_user_info(&self, user_id: Uuid) -> StoreResult<Option<UserInfo>> {
        let info = sqlx::query_as::<_, UserInfo>(
            r#"
            SELECT id, user_id, first_name, last_name, avatar, bio, location, phone
              FROM user_info
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(info)
    }

    async fn create_user_info(&self, info: &UserInfo) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_info (id, user_id, first_name, last_name, avatar, bio, location, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(info.id)
        .bind(info.user_id)
        .bind(&info.first_name)
        .bind(&info.last_name)
        .bind(&info.avatar)
        .bind(&info.bio)
        .bind(&info.location)
        .bind(&info.phone)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn update_user_info(&self, user_id: Uuid, update: &ProfileUpdate) -> StoreResult<bool> {
        let res = sqlx::query(
            r#"
            UPDATE user_info
               SET first_name = $2, last_name = $3, bio = $4, location = $5, phone = $6
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.bio)
        .bind(&update.location)
        .bind(&update.phone)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_stats(&self, user_id: Uuid) -> StoreResult<Option<UserStats>> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT id, user_id, courses_completed, courses_in_progress, followers, following,
                   level, xp, next_level_xp
              FROM user_stats
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(stats)
    }

    async fn list_achievements(&self, user_id: Uuid) -> StoreResult<Vec<UserAchievement>> {
        let rows = sqlx::query_as::<_, UserAchievement>(
            r#"
            SELECT id, user_id, achievement_name
              FROM user_achievements
             WHERE user_id = $1
             ORDER BY achievement_name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_badges(&self, user_id: Uuid) -> StoreResult<Vec<UserBadge>> {
        let rows = sqlx::query_as::<_, UserBadge>(
            r#"
            SELECT id, user_id, badge_name
              FROM user_badges
             WHERE user_id = $1
             ORDER BY badge_name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
