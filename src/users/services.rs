use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{ChangePasswordRequest, UpdateProfileRequest, UpdateStatusRequest},
    repo::UserStore,
    repo_types::{ProfileUpdate, StatusUpdate, UserAchievement, UserBadge, UserInfo, UserStats},
};
use crate::{
    auth::{password::PasswordHasher, services::MIN_PASSWORD_LEN},
    db::db_failure,
    error::{AppError, AppResult},
};

fn require_id(user_id: Uuid) -> AppResult<()> {
    if user_id.is_nil() {
        return Err(AppError::invalid_input("user id must not be nil"));
    }
    Ok(())
}

pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserInfo> {
        require_id(user_id)?;
        self.users
            .find_user_info(user_id)
            .await
            .map_err(db_failure("find_user_info"))?
            .ok_or(AppError::NotFound)
    }

    /// First name, last name and location are required; bio and phone may be blank.
    #[instrument(skip(self, req))]
    pub async fn update_profile(&self, user_id: Uuid, req: UpdateProfileRequest) -> AppResult<()> {
        require_id(user_id)?;
        let update = ProfileUpdate {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            bio: req.bio.trim().to_string(),
            location: req.location.trim().to_string(),
            phone: req.phone.trim().to_string(),
        };
        if update.first_name.is_empty() || update.last_name.is_empty() || update.location.is_empty()
        {
            return Err(AppError::MissingFields);
        }

        let updated = self
            .users
            .update_user_info(user_id, &update)
            .await
            .map_err(db_failure("update_user_info"))?;
        if !updated {
            return Err(AppError::NotFound);
        }
        info!(user_id = %user_id, "profile updated");
        Ok(())
    }

    pub async fn stats(&self, user_id: Uuid) -> AppResult<UserStats> {
        require_id(user_id)?;
        self.users
            .find_stats(user_id)
            .await
            .map_err(db_failure("find_stats"))?
            .ok_or(AppError::NotFound)
    }

    pub async fn achievements(&self, user_id: Uuid) -> AppResult<Vec<UserAchievement>> {
        require_id(user_id)?;
        self.users
            .list_achievements(user_id)
            .await
            .map_err(db_failure("list_achievements"))
    }

    pub async fn badges(&self, user_id: Uuid) -> AppResult<Vec<UserBadge>> {
        require_id(user_id)?;
        self.users
            .list_badges(user_id)
            .await
            .map_err(db_failure("list_badges"))
    }

    #[instrument(skip(self, req))]
    pub async fn change_password(&self, user_id: Uuid, req: ChangePasswordRequest) -> AppResult<()> {
        require_id(user_id)?;
        if req.current_password.is_empty() || req.new_password.is_empty() {
            return Err(AppError::MissingFields);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(db_failure("find_by_id"))?
            .ok_or(AppError::NotFound)?;

        if !self.hasher.verify(&req.current_password, &user.password_hash) {
            warn!(user_id = %user_id, "password change with wrong current password");
            return Err(AppError::InvalidCredentials);
        }
        if req.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let hash = self.hasher.hash(&req.new_password).map_err(|e| {
            error!(error = %e, "hash_password failed");
            AppError::InternalServer
        })?;
        let updated = self
            .users
            .update_password(user_id, &hash)
            .await
            .map_err(db_failure("update_password"))?;
        if !updated {
            return Err(AppError::NotFound);
        }
        info!(user_id = %user_id, "password changed");
        Ok(())
    }

    #[instrument(skip(self, req))]
    pub async fn update_status(
        &self,
        changed_by: Uuid,
        user_id: Uuid,
        req: UpdateStatusRequest,
    ) -> AppResult<()> {
        require_id(changed_by)?;
        require_id(user_id)?;
        if req.is_active.is_none() && req.is_verified.is_none() {
            return Err(AppError::MissingFields);
        }

        let status = StatusUpdate {
            is_active: req.is_active,
            is_verified: req.is_verified,
        };
        let updated = self
            .users
            .update_status(user_id, status)
            .await
            .map_err(db_failure("update_status"))?;
        if !updated {
            return Err(AppError::NotFound);
        }
        info!(
            user_id = %user_id,
            changed_by = %changed_by,
            is_active = ?status.is_active,
            is_verified = ?status.is_verified,
            "account status updated"
        );
        Ok(())
    }
}
